/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Single- and double-quoted flow scalars.

use super::{escape, fold_segments};
use crate::{
    reader::Reader,
    scanner::{
        error::{ScanError, ScanErrorKind as E, ScanResult as Result},
        is_blank, is_break, take_while,
    },
};

/// Scan a quoted scalar, having already confirmed the leading `'`/`"`.
/// Escapes inside a double-quoted scalar are validated but left raw
/// (`\` + escape text) in the returned string -- see
/// [`escape::unescape_double_quoted`].
pub(crate) fn scan_flow_scalar<R>(r: &mut R, double: bool) -> Result<String>
where
    R: Reader,
{
    r.advance();

    let mut segments = vec![String::new()];
    let mut breaks = Vec::new();

    loop
    {
        match r.front()
        {
            None => return Err(ScanError::new(E::UnterminatedScalar, r.mark())),

            Some('\'') if !double =>
            {
                r.advance();

                if r.front() == Some('\'')
                {
                    r.advance();
                    segments.last_mut().expect("segments always has >= 1 entry").push('\'');
                }
                else
                {
                    break;
                }
            },

            Some('"') if double =>
            {
                r.advance();
                break;
            },

            Some('\\') if double =>
            {
                r.advance();

                let esc = escape::scan_escape(r)?;
                let seg = segments.last_mut().expect("segments always has >= 1 entry");

                seg.push('\\');
                seg.push_str(&esc);
            },

            Some(c) if is_break(c) =>
            {
                let mut count = 0;

                while matches!(r.front(), Some(c) if is_break(c))
                {
                    r.advance();
                    count += 1;
                }

                take_while(r, is_blank);

                segments.push(String::new());
                breaks.push(count);
            },

            Some(c) =>
            {
                r.advance();
                segments.last_mut().expect("segments always has >= 1 entry").push(c);
            },
        }
    }

    Ok(fold_segments(segments, breaks))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::from_utf8;

    #[test]
    fn single_quoted_doubles_escape_quote()
    {
        let mut r = from_utf8("'it''s'");
        assert_eq!(scan_flow_scalar(&mut r, false).unwrap(), "it's");
    }

    #[test]
    fn double_quoted_keeps_escape_raw()
    {
        let mut r = from_utf8(r#""a\nb""#);
        assert_eq!(scan_flow_scalar(&mut r, true).unwrap(), r"a\nb");
    }

    #[test]
    fn folds_embedded_line_break()
    {
        let mut r = from_utf8("\"a\nb\"");
        assert_eq!(scan_flow_scalar(&mut r, true).unwrap(), "a b");
    }

    #[test]
    fn unterminated_is_an_error()
    {
        let mut r = from_utf8("'abc");
        assert!(scan_flow_scalar(&mut r, false).is_err());
    }
}
