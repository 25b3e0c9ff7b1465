/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error types returned from the [`reader`](super) module.

use std::{error::Error as StdError, fmt, io, str::Utf8Error};

use crate::error::internal::{Error as InternalError, SourceError};

/// Type alias of the `Result`s returned from this module
pub type ReaderResult<T> = std::result::Result<T, ReaderError>;

/// Possible errors that can occur while constructing a Reader from an
/// underlying byte source.
#[derive(Debug)]
pub enum ReaderError
{
    /// Encountered an invalid UTF8 sequence
    UTF8(Utf8Error),
    /// Catch all wrapper for any underlying IO errors reported to us
    IO(io::Error),
}

impl fmt::Display for ReaderError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            ReaderError::UTF8(e) => fmt::Display::fmt(e, f),
            ReaderError::IO(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl StdError for ReaderError
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        match self
        {
            ReaderError::UTF8(ref e) => Some(e),
            ReaderError::IO(ref e) => Some(e),
        }
    }
}

impl From<Utf8Error> for ReaderError
{
    fn from(e: Utf8Error) -> Self
    {
        Self::UTF8(e)
    }
}

impl From<io::Error> for ReaderError
{
    fn from(e: io::Error) -> Self
    {
        Self::IO(e)
    }
}

impl From<ReaderError> for crate::error::Error
{
    fn from(err: ReaderError) -> Self
    {
        let source = match err
        {
            ReaderError::UTF8(e) => SourceError::from(e),
            ReaderError::IO(e) => SourceError::from(e),
        };

        InternalError::new(source).into()
    }
}
