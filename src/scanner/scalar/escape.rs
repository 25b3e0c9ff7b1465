/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Double-quoted scalar escape handling.
//!
//! The Scanner only *validates* escape syntax while tokenizing (correct
//! hex digit counts, a recognized escape character) and keeps the raw
//! `\`-prefixed text in the [`Token::Scalar`](crate::token::Token::
//! Scalar) payload -- substituting the actual decoded characters is
//! deferred to [`unescape_double_quoted`], called once by the Parser
//! when it turns the token into an Event. This keeps the tokenizer
//! allocation-lean: a scalar that never makes it past the Scanner (e.g.
//! because the document turns out invalid later) never pays for
//! unescaping.
//!
//! `%XX` URI escapes (used in tag suffixes, not scalars) are a separate
//! concern, decoded eagerly by [`super::super::tag`] since a tag's
//! textual form must be valid UTF8 by the time it is used to resolve a
//! handle.

use crate::{
    reader::Reader,
    scanner::error::{ScanError, ScanErrorKind as E, ScanResult as Result},
};

/// Having already consumed the leading `\`, scan and validate one
/// escape sequence, returning its raw text (not including the `\`).
pub(crate) fn scan_escape<R>(r: &mut R) -> Result<String>
where
    R: Reader,
{
    let c = r.front().ok_or_else(|| ScanError::new(E::UnknownEscape, r.mark()))?;

    match c
    {
        '0' | 'a' | 'b' | 't' | '\t' | 'n' | 'v' | 'f' | 'r' | 'e' | ' ' | '"' | '/' | '\\'
        | 'N' | '_' | 'L' | 'P' =>
        {
            r.advance();
            Ok(c.to_string())
        },

        // A backslash immediately before a line break swallows the
        // break and following leading whitespace -- represented here
        // as a bare backslash escape whose "digits" is the break
        // itself, since the actual swallowing is performed by the
        // caller (scan_double_quoted) once it sees this return value.
        '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}' =>
        {
            r.advance();
            Ok(c.to_string())
        },

        'x' => scan_hex_escape(r, 'x', 2),
        'u' => scan_hex_escape(r, 'u', 4),
        'U' => scan_hex_escape(r, 'U', 8),

        _ => Err(ScanError::new(E::UnknownEscape, r.mark())),
    }
}

fn scan_hex_escape<R>(r: &mut R, tag: char, digits: usize) -> Result<String>
where
    R: Reader,
{
    r.advance();

    let mut out = String::with_capacity(digits + 1);
    out.push(tag);

    for _ in 0..digits
    {
        match r.front()
        {
            Some(c) if c.is_ascii_hexdigit() =>
            {
                out.push(c);
                r.advance();
            },
            _ => return Err(ScanError::new(E::UnknownEscape, r.mark())),
        }
    }

    Ok(out)
}

/// Decode a double-quoted scalar's raw text (backslash escapes intact)
/// into its final `String` value. Assumes `raw` was already produced by
/// a Scanner that validated every escape via [`scan_escape`] -- a
/// malformed escape here is a logic error, not a user error.
pub(crate) fn unescape_double_quoted(raw: &str) -> String
{
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next()
    {
        if c != '\\'
        {
            out.push(c);
            continue;
        }

        match chars.next().expect("validated escape: char after '\\'")
        {
            '0' => out.push('\0'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            't' | '\t' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{B}'),
            'f' => out.push('\u{C}'),
            'r' => out.push('\r'),
            'e' => out.push('\u{1B}'),
            ' ' => out.push(' '),
            '"' => out.push('"'),
            '/' => out.push('/'),
            '\\' => out.push('\\'),
            'N' => out.push('\u{85}'),
            '_' => out.push('\u{A0}'),
            'L' => out.push('\u{2028}'),
            'P' => out.push('\u{2029}'),

            // A line break escape: swallow it and any further leading
            // blanks on the following line (already stripped by the
            // scanner's line-join logic upstream of this function for
            // plain/folded content, but double-quoted scalars keep
            // their breaks literal except right after a `\`).
            '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}' =>
            {
                while matches!(chars.peek(), Some(' ') | Some('\t'))
                {
                    chars.next();
                }
            },

            tag @ ('x' | 'u' | 'U') =>
            {
                let digits = match tag
                {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };

                let hex: String = (0..digits)
                    .map(|_| chars.next().expect("validated escape: hex digit"))
                    .collect();

                let code = u32::from_str_radix(&hex, 16).expect("validated escape: hex digits");

                if let Some(decoded) = char::from_u32(code)
                {
                    out.push(decoded);
                }
            },

            other => unreachable!("unvalidated escape character: {other:?}"),
        }
    }

    out
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_common_escapes()
    {
        assert_eq!(unescape_double_quoted(r"a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn decodes_hex_escapes()
    {
        assert_eq!(unescape_double_quoted(r"\x41B\U00000043"), "ABC");
    }

    #[test]
    fn swallows_escaped_line_break()
    {
        assert_eq!(unescape_double_quoted("a\\\n   b"), "ab");
    }
}
