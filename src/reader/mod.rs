/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The module contains the adapters for converting plain
//! bytes to a representation that is useful for parsing.
//!
//! This behavior is defined by the [`Reader`] trait, which is
//! sealed, and cannot be implemented outside of this library.
//!
//! There are two conversions that are supported, each with a
//! top level function that handles the conversion:
//!
//! - `&str` => [`from_utf8()`]
//! - `T: std::io::Read` => [`from_read()`]

pub mod io_reader;
pub mod str_reader;

pub(crate) mod error;

use std::fmt::Debug;

pub use self::{io_reader::IoReader, str_reader::StrReader};
use crate::mark::Mark;

/// Instantiate a new [`Reader`] from the given UTF8 string slice.
///
/// ## Examples
///
/// ```rust
/// use yamlet::reader::from_utf8;
///
/// let yaml = "{a yaml: mapping}";
///
/// let reader = from_utf8(yaml);
/// ```
pub fn from_utf8(utf8: &str) -> StrReader<'_>
{
    StrReader::new(utf8)
}

/// Instantiate a new [`Reader`] from the given [`std::io::Read`] source.
///
/// ## Errors
///
/// This eagerly reads the whole source to end of stream, returning an
/// error if the underlying reader errors, or if the bytes read are not
/// valid UTF8.
///
/// ## Examples
///
/// ```no_run
/// use std::fs::File;
///
/// use yamlet::reader::from_read;
///
/// let file = File::open("config.yaml")?;
///
/// let reader = from_read(file)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_read<R>(src: R) -> Result<IoReader, error::ReaderError>
where
    R: std::io::Read,
{
    IoReader::new(src)
}

/// The stream encoding detected by a [`Reader`] at construction.
///
/// This crate only supports UTF8 input; the variant exists so a
/// [`Token::StreamStart`](crate::token::Token::StreamStart) can report
/// what it saw, same as the rest of the YAML ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding
{
    Utf8,
}

/// A cursor over decoded Unicode code points, upstream of the Scanner.
///
/// `front()`/`advance()` form a pull cursor: `front` never consumes,
/// `advance` always does. `save`/`restore` snapshot and rewind the
/// cursor's position, used by the Scanner for the bounded (≤ 3 code
/// point) lookahead needed to recognize `---`, `...` and similar
/// multi-character tokens without a dedicated pushback buffer.
///
/// Sealed: only [`StrReader`] and [`IoReader`] may implement this.
pub trait Reader: Debug + private::Sealed
{
    /// Returns the next code point without consuming it, or `None` at
    /// end of stream.
    fn front(&self) -> Option<char>;

    /// Consume and return the next code point.
    fn advance(&mut self) -> Option<char>;

    /// True if the stream is exhausted.
    fn empty(&self) -> bool
    {
        self.front().is_none()
    }

    /// Take a cheap snapshot of the current cursor position.
    fn save(&self) -> Snapshot;

    /// Rewind the cursor to a previously taken [`Snapshot`].
    fn restore(&mut self, snapshot: Snapshot);

    /// Zero-indexed line number of the cursor.
    fn line(&self) -> u64;

    /// Zero-indexed column (code points since the last line break).
    fn column(&self) -> u64;

    /// Zero-indexed offset into the stream, in code points.
    fn char_index(&self) -> u64;

    /// The [`Mark`] of the cursor's current position.
    fn mark(&self) -> Mark
    {
        Mark::new(self.line(), self.column(), self.char_index())
    }

    /// The encoding detected for this stream.
    fn encoding(&self) -> Encoding;
}

/// An opaque, cheap to copy snapshot of a [`Reader`]'s cursor, taken via
/// [`Reader::save`] and restored via [`Reader::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(cursor::Snapshot);

mod private
{
    pub trait Sealed {}
}

pub(crate) mod cursor
{
    //! Shared cursor bookkeeping used by both [`StrReader`](super::
    //! StrReader) and [`IoReader`](super::IoReader); both decode their
    //! source eagerly into a `Vec<char>` and walk it with identical
    //! line/column tracking.

    use super::Mark;

    const fn is_break(c: char) -> bool
    {
        matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Snapshot
    {
        pos:         usize,
        line:        u64,
        column:      u64,
        char_index:  u64,
        last_was_cr: bool,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct Cursor
    {
        chars:       Vec<char>,
        pos:         usize,
        line:        u64,
        column:      u64,
        char_index:  u64,
        last_was_cr: bool,
    }

    impl Cursor
    {
        pub fn new(chars: Vec<char>) -> Self
        {
            Self {
                chars,
                pos: 0,
                line: 0,
                column: 0,
                char_index: 0,
                last_was_cr: false,
            }
        }

        pub fn front(&self) -> Option<char>
        {
            self.chars.get(self.pos).copied()
        }

        pub fn advance(&mut self) -> Option<char>
        {
            let ch = self.front()?;

            self.pos += 1;
            self.char_index += 1;

            if is_break(ch)
            {
                // A lone '\n' following a '\r' is the second half of a
                // \r\n pair -- the line was already advanced on the \r.
                if !(ch == '\n' && self.last_was_cr)
                {
                    self.line += 1;
                    self.column = 0;
                }

                self.last_was_cr = ch == '\r';
            }
            else
            {
                self.column += 1;
                self.last_was_cr = false;
            }

            Some(ch)
        }

        pub fn line(&self) -> u64
        {
            self.line
        }

        pub fn column(&self) -> u64
        {
            self.column
        }

        pub fn char_index(&self) -> u64
        {
            self.char_index
        }

        pub fn mark(&self) -> Mark
        {
            Mark::new(self.line, self.column, self.char_index)
        }

        pub fn save(&self) -> Snapshot
        {
            Snapshot {
                pos: self.pos,
                line: self.line,
                column: self.column,
                char_index: self.char_index,
                last_was_cr: self.last_was_cr,
            }
        }

        pub fn restore(&mut self, snap: Snapshot)
        {
            let Snapshot {
                pos,
                line,
                column,
                char_index,
                last_was_cr,
            } = snap;

            self.pos = pos;
            self.line = line;
            self.column = column;
            self.char_index = char_index;
            self.last_was_cr = last_was_cr;
        }
    }
}
