/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scalar scanning: plain, single/double quoted, and block (literal /
//! folded) styles.

pub(crate) mod block;
pub(crate) mod escape;
pub(crate) mod flow;
pub(crate) mod plain;

/// Join scanned line segments, applying YAML's line folding rule: a
/// single break between two segments folds to a space, `n` consecutive
/// breaks fold to `n - 1` newlines.
pub(crate) fn fold_segments(segments: Vec<String>, breaks: Vec<usize>) -> String
{
    let mut out = String::new();

    for (i, segment) in segments.iter().enumerate()
    {
        out.push_str(segment);

        if let Some(&count) = breaks.get(i)
        {
            if count <= 1
            {
                out.push(' ');
            }
            else
            {
                for _ in 0..count - 1
                {
                    out.push('\n');
                }
            }
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
    fn single_break_folds_to_space()
    {
        let segments = vec!["a".to_string(), "b".to_string()];
        assert_eq!(fold_segments(segments, vec![1]), "a b");
    }

    #[test]
    fn double_break_folds_to_newline()
    {
        let segments = vec!["a".to_string(), "b".to_string()];
        assert_eq!(fold_segments(segments, vec![2]), "a\nb");
    }
}
