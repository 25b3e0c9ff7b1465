/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error types returned from the [`crate::scanner`] module.

use crate::{
    error::internal::{Error as InternalError, ErrorCode},
    mark::Mark,
};

pub(crate) type ScanResult<T> = std::result::Result<T, ScanError>;

/// A Scanner error: a [`ScanErrorKind`] plus the mark at which it was
/// found, and optionally a context message + mark describing what the
/// Scanner was doing (e.g. "while scanning a quoted scalar").
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ScanError
{
    pub kind:         ScanErrorKind,
    pub mark:         Mark,
    pub context:      Option<(&'static str, Mark)>,
}

impl ScanError
{
    pub fn new(kind: ScanErrorKind, mark: Mark) -> Self
    {
        Self {
            kind,
            mark,
            context: None,
        }
    }

    pub fn with_context(mut self, message: &'static str, mark: Mark) -> Self
    {
        self.context = Some((message, mark));
        self
    }
}

/// Possible ways in which the Scanner can fail to tokenize a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanErrorKind
{
    UnknownDirective,
    MissingMajor,
    MissingMinor,
    MissingValue,
    InvalidVersion,
    InvalidTagHandle,
    InvalidTagPrefix,
    InvalidTagSuffix,
    InvalidAnchorName,
    InvalidFlowScalar,
    InvalidPlainScalar,
    InvalidBlockScalar,
    InvalidBlockEntry,
    InvalidTab,
    InvalidKey,
    InvalidValue,
    UnknownEscape,
    UnknownDelimiter,
    UnexpectedEOF,
    IntOverflow,
    KeyTooLong,
    UnterminatedScalar,
    InvalidUriEscape,
}

impl From<ScanErrorKind> for ErrorCode
{
    fn from(kind: ScanErrorKind) -> Self
    {
        use ScanErrorKind::*;

        match kind
        {
            UnknownDirective => ErrorCode::UnknownDirective,
            MissingMajor => ErrorCode::MissingMajor,
            MissingMinor => ErrorCode::MissingMinor,
            MissingValue => ErrorCode::MissingValue,
            InvalidVersion => ErrorCode::InvalidVersion,
            InvalidTagHandle => ErrorCode::InvalidTagHandle,
            InvalidTagPrefix => ErrorCode::InvalidTagPrefix,
            InvalidTagSuffix => ErrorCode::InvalidTagSuffix,
            InvalidAnchorName => ErrorCode::InvalidAnchorName,
            InvalidFlowScalar => ErrorCode::InvalidFlowScalar,
            InvalidPlainScalar => ErrorCode::InvalidPlainScalar,
            InvalidBlockScalar => ErrorCode::InvalidBlockScalar,
            InvalidBlockEntry => ErrorCode::InvalidBlockEntry,
            InvalidTab => ErrorCode::InvalidTab,
            InvalidKey => ErrorCode::InvalidKey,
            InvalidValue => ErrorCode::InvalidValue,
            UnknownEscape => ErrorCode::UnknownEscape,
            UnknownDelimiter => ErrorCode::UnknownDelimiter,
            UnexpectedEOF => ErrorCode::UnexpectedEOF,
            IntOverflow => ErrorCode::IntOverflow,
            KeyTooLong => ErrorCode::KeyTooLong,
            UnterminatedScalar => ErrorCode::UnterminatedScalar,
            InvalidUriEscape => ErrorCode::InvalidUriEscape,
        }
    }
}

impl From<ScanError> for InternalError
{
    fn from(err: ScanError) -> Self
    {
        let ScanError { kind, mark, context } = err;

        let mut e = InternalError::with_mark(ErrorCode::from(kind), mark);

        if let Some((message, mark)) = context
        {
            e = e.context(message, mark);
        }

        e
    }
}

impl From<ScanError> for crate::error::Error
{
    fn from(err: ScanError) -> Self
    {
        InternalError::from(err).into()
    }
}
