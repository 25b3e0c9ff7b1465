/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Reader`](super::Reader) for owned
//! [`std::io::Read`] sources.

use std::io::Read as StdRead;

use super::{cursor::Cursor, error::ReaderResult, private, Encoding, Reader, Snapshot};

/// A [`Reader`] over any [`std::io::Read`] source.
///
/// Unlike [`StrReader`](super::StrReader) this owns its decoded data:
/// the source is read to completion and decoded to UTF8 once, at
/// construction time, since the Scanner's lookahead/retroactive-insertion
/// machinery needs random access over the whole document.
#[derive(Debug)]
pub struct IoReader
{
    cursor: Cursor,
}

impl IoReader
{
    /// Instantiate a new [`IoReader`], eagerly reading `src` to EOF.
    ///
    /// ## Errors
    ///
    /// Returns an error if the underlying source errors, or if the
    /// bytes read are not valid UTF8.
    pub fn new<R>(mut src: R) -> ReaderResult<Self>
    where
        R: StdRead,
    {
        let mut buf = Vec::new();
        src.read_to_end(&mut buf)?;

        let data = String::from_utf8(buf).map_err(|e| e.utf8_error())?;

        Ok(Self {
            cursor: Cursor::new(data.chars().collect()),
        })
    }
}

impl Reader for IoReader
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

impl private::Sealed for IoReader {}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_to_eof()
    {
        let mut r = IoReader::new("ab".as_bytes()).unwrap();

        assert_eq!(r.advance(), Some('a'));
        assert_eq!(r.advance(), Some('b'));
        assert!(r.empty());
    }

    #[test]
    fn rejects_invalid_utf8()
    {
        let bytes: &[u8] = &[0xff, 0xfe, 0xfd];

        assert!(IoReader::new(bytes).is_err());
    }
}
