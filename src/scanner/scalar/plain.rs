/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Plain (unquoted) scalars.
//!
//! Unlike quoted styles, a plain scalar's extent depends on the
//! surrounding [`Context`]: in flow collections it stops at `,[]{}`; in
//! block context it continues across lines only while more-indented
//! than the enclosing collection.

use super::fold_segments;
use crate::{
    reader::Reader,
    scanner::{
        context::Context,
        error::ScanResult as Result,
        is_blank, is_break, is_white, take_while,
    },
};

pub(crate) fn scan_plain_scalar<R>(r: &mut R, cxt: &Context) -> Result<String>
where
    R: Reader,
{
    let in_flow = cxt.is_flow();
    let min_indent = cxt.indent().as_usize().unwrap_or(0);

    let mut segments = vec![String::new()];
    let mut breaks = Vec::new();

    loop
    {
        scan_plain_line(r, in_flow, segments.last_mut().expect("segments always has >= 1 entry"));

        {
            let seg = segments.last_mut().expect("segments always has >= 1 entry");
            let trimmed = seg.trim_end_matches(|c| c == ' ' || c == '\t').len();
            seg.truncate(trimmed);
        }

        if !matches!(r.front(), Some(c) if is_break(c))
        {
            break;
        }

        let snapshot = r.save();

        let mut count = 0;

        while matches!(r.front(), Some(c) if is_break(c))
        {
            r.advance();
            count += 1;
        }

        let leading = take_while(r, is_blank);

        let continues = match r.front()
        {
            None => false,
            Some(c) if in_flow && matches!(c, ',' | '[' | ']' | '{' | '}') => false,
            Some(_) => leading.chars().count() > min_indent,
        };

        if !continues
        {
            r.restore(snapshot);
            break;
        }

        segments.push(String::new());
        breaks.push(count);
    }

    Ok(fold_segments(segments, breaks))
}

/// Consume one physical line's worth of plain scalar content into `out`.
fn scan_plain_line<R>(r: &mut R, in_flow: bool, out: &mut String)
where
    R: Reader,
{
    let mut prev_blank = false;

    loop
    {
        match r.front()
        {
            None => break,
            Some(c) if is_break(c) => break,

            Some('#') if prev_blank => break,

            Some(':') =>
            {
                let snapshot = r.save();
                r.advance();

                let stops = match r.front()
                {
                    None => true,
                    Some(c) if is_white(c) => true,
                    Some(c) if in_flow && matches!(c, ',' | '[' | ']' | '{' | '}') => true,
                    _ => false,
                };

                if stops
                {
                    r.restore(snapshot);
                    break;
                }

                out.push(':');
                prev_blank = false;
            },

            Some(c) if in_flow && matches!(c, ',' | '[' | ']' | '{' | '}') => break,

            Some(c) =>
            {
                r.advance();
                out.push(c);
                prev_blank = is_blank(c);
            },
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::from_utf8;

    #[test]
    fn stops_before_comment_after_blank()
    {
        let mut r = from_utf8("a value # a comment\n");
        let cxt = Context::new();
        assert_eq!(scan_plain_scalar(&mut r, &cxt).unwrap(), "a value");
    }

    #[test]
    fn colon_without_trailing_space_is_content()
    {
        let mut r = from_utf8("http://example.com\n");
        let cxt = Context::new();
        assert_eq!(scan_plain_scalar(&mut r, &cxt).unwrap(), "http://example.com");
    }

    #[test]
    fn stops_at_value_indicator()
    {
        let mut r = from_utf8("key: value\n");
        let cxt = Context::new();
        assert_eq!(scan_plain_scalar(&mut r, &cxt).unwrap(), "key");
    }

    #[test]
    fn flow_context_stops_at_comma()
    {
        let mut r = from_utf8("a, b\n");
        let mut cxt = Context::new();
        cxt.flow_increment().unwrap();
        assert_eq!(scan_plain_scalar(&mut r, &cxt).unwrap(), "a");
    }
}
