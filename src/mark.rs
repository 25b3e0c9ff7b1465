/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A [`Mark`] is a small, `Copy`able position record attached to every
//! [`Token`](crate::token::Token) and [`Event`](crate::event::types::Event),
//! used both to report marked errors (see [`crate::error`]) and to let a
//! [`Composer`](crate::node::composer::Composer) stamp a [`Node`]'s
//! `start_mark`/`end_mark`.

/// A position in a YAML byte stream.
///
/// `char_index` counts decoded code points from the start of input, not
/// bytes -- multi-byte UTF8 sequences count as a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark
{
    line:       u64,
    column:     u64,
    char_index: u64,
}

impl Mark
{
    /// The zero mark, i.e. the very start of a stream.
    pub const fn new(line: u64, column: u64, char_index: u64) -> Self
    {
        Self {
            line,
            column,
            char_index,
        }
    }

    /// Zero-indexed line number.
    pub const fn line(&self) -> u64
    {
        self.line
    }

    /// Zero-indexed column (offset into the current line).
    pub const fn column(&self) -> u64
    {
        self.column
    }

    /// Zero-indexed offset into the stream, counted in code points.
    pub const fn char_index(&self) -> u64
    {
        self.char_index
    }
}

impl std::fmt::Display for Mark
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(
            f,
            "line {}, column {}",
            self.line + 1,
            self.column + 1
        )
    }
}
