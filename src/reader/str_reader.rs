/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Reader`](super::Reader) for borrowed
//! UTF8 slices (`&str`s).

use super::{cursor::Cursor, error::ReaderResult, private, Encoding, Reader, Snapshot};

/// A [`Reader`] over a borrowed `&str`.
#[derive(Debug, Clone)]
pub struct StrReader<'de>
{
    /// Kept so callers can recover the original slice (e.g. for a
    /// borrowing plain scalar scan); decoding happens once, eagerly,
    /// into `cursor`.
    #[allow(dead_code)]
    data:   &'de str,
    cursor: Cursor,
}

impl<'de> StrReader<'de>
{
    /// Instantiate a new [`StrReader`] from the given UTF8 slice.
    pub fn new(data: &'de str) -> Self
    {
        Self {
            data,
            cursor: Cursor::new(data.chars().collect()),
        }
    }

    /// Instantiate a new [`StrReader`] from the given bytes, returning
    /// an error if they are not valid UTF8.
    pub(crate) fn try_from_bytes(data: &'de [u8]) -> ReaderResult<Self>
    {
        let s = std::str::from_utf8(data)?;

        Ok(Self::new(s))
    }
}

impl<'de> Reader for StrReader<'de>
{
    fn front(&self) -> Option<char>
    {
        self.cursor.front()
    }

    fn advance(&mut self) -> Option<char>
    {
        self.cursor.advance()
    }

    fn save(&self) -> Snapshot
    {
        Snapshot(self.cursor.save())
    }

    fn restore(&mut self, snapshot: Snapshot)
    {
        self.cursor.restore(snapshot.0)
    }

    fn line(&self) -> u64
    {
        self.cursor.line()
    }

    fn column(&self) -> u64
    {
        self.cursor.column()
    }

    fn char_index(&self) -> u64
    {
        self.cursor.char_index()
    }

    fn encoding(&self) -> Encoding
    {
        Encoding::Utf8
    }
}

impl private::Sealed for StrReader<'_> {}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn front_does_not_consume()
    {
        let mut r = StrReader::new("ab");

        assert_eq!(r.front(), Some('a'));
        assert_eq!(r.front(), Some('a'));
        assert_eq!(r.advance(), Some('a'));
        assert_eq!(r.front(), Some('b'));
    }

    #[test]
    fn empty_at_eof()
    {
        let mut r = StrReader::new("a");

        assert!(!r.empty());
        r.advance();
        assert!(r.empty());
        assert_eq!(r.front(), None);
    }

    #[test]
    fn tracks_line_and_column()
    {
        let mut r = StrReader::new("ab\ncd");

        for _ in 0..3
        {
            r.advance();
        }

        assert_eq!(r.line(), 1);
        assert_eq!(r.column(), 0);
        assert_eq!(r.char_index(), 3);
    }

    #[test]
    fn crlf_counts_as_one_line()
    {
        let mut r = StrReader::new("a\r\nb");

        for _ in 0..3
        {
            r.advance();
        }

        assert_eq!(r.line(), 1);
        assert_eq!(r.column(), 0);
    }

    #[test]
    fn save_restore_roundtrips()
    {
        let mut r = StrReader::new("abc");

        r.advance();
        let snap = r.save();
        r.advance();
        r.advance();
        assert!(r.empty());

        r.restore(snap);
        assert_eq!(r.front(), Some('b'));
        assert_eq!(r.char_index(), 1);
    }

    #[test]
    fn rejects_invalid_utf8()
    {
        let bytes = [0xff, 0xfe, 0xfd];

        assert!(StrReader::try_from_bytes(&bytes).is_err());
    }
}
