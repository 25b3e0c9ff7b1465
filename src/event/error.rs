/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Errors surfaced while turning a [`Token`](crate::token::Token)
//! stream into [`Event`](super::types::Event)s.

use crate::{
    error::internal::{Error as InternalError, ErrorCode},
    mark::Mark,
    scanner::error::ScanError,
};

pub(crate) type ParseResult<T> = std::result::Result<T, ParseError>;

/// Possible errors encountered while parsing YAML events out of a
/// token stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParseError
{
    /// A problem occurred while scanning the underlying token stream.
    Scanner(ScanError),

    /// More than one `%YAML` directive was found in a single document.
    DuplicateVersion(Mark),
    /// More than one `%TAG` directive was found for the same handle in
    /// a single document.
    DuplicateTagDirective(Mark),
    /// A tag referenced a handle that was never defined.
    UndefinedTag(Mark),
    /// A second document was found without an explicit `---` marker.
    MissingDocumentStart(Mark),
    /// A block sequence entry was required but not found.
    MissingBlockEntry(Mark),
    /// A node was required but not found.
    MissingNode(Mark),
    /// A mapping key was required but not found.
    MissingKey(Mark),
    /// A flow sequence was missing its `,` or `]`.
    MissingFlowSequenceEntryOrEnd(Mark),
    /// A flow mapping was missing its `,` or `}`.
    MissingFlowMappingEntryOrEnd(Mark),
    /// The token stream ended where a specific token was expected.
    UnexpectedEndOfStream,
}

impl From<ScanError> for ParseError
{
    fn from(e: ScanError) -> Self
    {
        Self::Scanner(e)
    }
}

impl From<ParseError> for InternalError
{
    fn from(err: ParseError) -> Self
    {
        use ParseError::*;

        match err
        {
            Scanner(e) => e.into(),
            DuplicateVersion(mark) => InternalError::with_mark(ErrorCode::DuplicateVersion, mark),
            DuplicateTagDirective(mark) =>
            {
                InternalError::with_mark(ErrorCode::DuplicateTagDirective, mark)
            },
            UndefinedTag(mark) => InternalError::with_mark(ErrorCode::UndefinedTag, mark),
            MissingDocumentStart(mark) =>
            {
                InternalError::with_mark(ErrorCode::MissingDocumentStart, mark)
            },
            MissingBlockEntry(mark) => InternalError::with_mark(ErrorCode::MissingBlockEntry, mark),
            MissingNode(mark) => InternalError::with_mark(ErrorCode::MissingNode, mark),
            MissingKey(mark) => InternalError::with_mark(ErrorCode::MissingKey, mark),
            MissingFlowSequenceEntryOrEnd(mark) =>
            {
                InternalError::with_mark(ErrorCode::MissingFlowSequenceEntryOrEnd, mark)
            },
            MissingFlowMappingEntryOrEnd(mark) =>
            {
                InternalError::with_mark(ErrorCode::MissingFlowMappingEntryOrEnd, mark)
            },
            UnexpectedEndOfStream => InternalError::new(ErrorCode::UnexpectedEOF),
        }
    }
}

impl From<ParseError> for crate::error::Error
{
    fn from(err: ParseError) -> Self
    {
        InternalError::from(err).into()
    }
}
