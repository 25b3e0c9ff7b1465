/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Literal (`|`) and folded (`>`) block scalars.

use crate::{
    reader::Reader,
    scanner::{
        context::Indent,
        error::{ScanError, ScanErrorKind as E, ScanResult as Result},
        is_blank, is_break, take_while,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping
{
    Strip,
    Clip,
    Keep,
}

/// Scan a block scalar, having already confirmed the leading `|`/`>`.
/// `parent_indent` is the indentation of the construct the scalar is
/// nested under (a mapping value or sequence entry), used as the base
/// for an auto-detected content indentation.
pub(crate) fn scan_block_scalar<R>(r: &mut R, literal: bool, parent_indent: Indent) -> Result<String>
where
    R: Reader,
{
    r.advance();

    let mut chomping = Chomping::Clip;
    let mut explicit_indent = None;

    loop
    {
        match r.front()
        {
            Some('+') if chomping == Chomping::Clip =>
            {
                chomping = Chomping::Keep;
                r.advance();
            },
            Some('-') if chomping == Chomping::Clip =>
            {
                chomping = Chomping::Strip;
                r.advance();
            },
            Some(c) if c.is_ascii_digit() && c != '0' && explicit_indent.is_none() =>
            {
                explicit_indent = Some(c.to_digit(10).expect("ascii digit") as usize);
                r.advance();
            },
            _ => break,
        }
    }

    take_while(r, is_blank);

    if r.front() == Some('#')
    {
        take_while(r, |c| !is_break(c));
    }

    match r.front()
    {
        Some(c) if is_break(c) =>
        {
            r.advance();
        },
        None => {},
        _ => return Err(ScanError::new(E::InvalidBlockScalar, r.mark())),
    }

    let base = parent_indent.as_usize().unwrap_or(0);

    let mut lines: Vec<String> = Vec::new();
    let mut indent: Option<usize> = explicit_indent.map(|extra| base + extra);
    let mut trailing_breaks = 0usize;

    loop
    {
        let line_start = r.save();
        let mut column = 0;

        while r.front() == Some(' ')
        {
            r.advance();
            column += 1;
        }

        match r.front()
        {
            None => break,
            Some(c) if is_break(c) =>
            {
                r.advance();
                trailing_breaks += 1;
                continue;
            },
            _ => {},
        }

        let content_indent = match indent
        {
            Some(i) => i,
            None =>
            {
                if column <= base
                {
                    r.restore(line_start);
                    break;
                }

                indent = Some(column);
                column
            },
        };

        if column < content_indent
        {
            r.restore(line_start);
            break;
        }

        if column > content_indent
        {
            r.restore(line_start);

            for _ in 0..content_indent
            {
                r.advance();
            }
        }

        let text = take_while(r, |c| !is_break(c));

        lines.extend(std::iter::repeat(String::new()).take(trailing_breaks));
        trailing_breaks = 0;
        lines.push(text);

        match r.front()
        {
            Some(c) if is_break(c) =>
            {
                r.advance();
            },
            None => break,
            _ => return Err(ScanError::new(E::InvalidBlockScalar, r.mark())),
        }
    }

    let body = if literal { lines.join("\n") } else { fold_block_lines(&lines) };

    Ok(apply_chomping(body, chomping, trailing_breaks))
}

/// Folded style: a break between two non-empty lines becomes a space;
/// breaks touching a blank (more-indented or empty) line stay literal.
fn fold_block_lines(lines: &[String]) -> String
{
    let mut out = String::new();

    for (i, line) in lines.iter().enumerate()
    {
        if i > 0
        {
            if lines[i - 1].is_empty() || line.is_empty()
            {
                out.push('\n');
            }
            else
            {
                out.push(' ');
            }
        }

        out.push_str(line);
    }

    out
}

fn apply_chomping(mut body: String, chomping: Chomping, trailing_breaks: usize) -> String
{
    match chomping
    {
        Chomping::Strip => body,

        Chomping::Clip =>
        {
            if !body.is_empty() || trailing_breaks > 0
            {
                body.push('\n');
            }

            body
        },

        Chomping::Keep =>
        {
            if !body.is_empty()
            {
                body.push('\n');
            }

            for _ in 0..trailing_breaks
            {
                body.push('\n');
            }

            body
        },
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::from_utf8;

    #[test]
    fn literal_preserves_breaks()
    {
        let mut r = from_utf8("|\n  a\n  b\n");
        assert_eq!(scan_block_scalar(&mut r, true, Indent::default()).unwrap(), "a\nb\n");
    }

    #[test]
    fn folded_joins_lines_with_space()
    {
        let mut r = from_utf8(">\n  a\n  b\n");
        assert_eq!(scan_block_scalar(&mut r, false, Indent::default()).unwrap(), "a b\n");
    }

    #[test]
    fn strip_chomping_drops_trailing_newline()
    {
        let mut r = from_utf8("|-\n  a\n");
        assert_eq!(scan_block_scalar(&mut r, true, Indent::default()).unwrap(), "a");
    }

    #[test]
    fn keep_chomping_preserves_trailing_blank_lines()
    {
        let mut r = from_utf8("|+\n  a\n\n");
        assert_eq!(scan_block_scalar(&mut r, true, Indent::default()).unwrap(), "a\n\n");
    }

    #[test]
    fn explicit_indent_digit_is_honored()
    {
        let mut r = from_utf8("|2\n   a\n  b\n");
        assert_eq!(scan_block_scalar(&mut r, true, Indent::default()).unwrap(), " a\nb\n");
    }
}
