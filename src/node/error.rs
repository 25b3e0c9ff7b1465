/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Errors surfaced while composing [`Event`](crate::event::types::Event)s
//! into a [`Node`](super::Node) tree.

use crate::{
    error::internal::{Error as InternalError, ErrorCode},
    event::error::ParseError,
    mark::Mark,
    scanner::error::ScanError,
};

pub(crate) type NodeResult<T> = std::result::Result<T, NodeError>;

/// Possible errors encountered while composing nodes out of an event
/// stream.
#[derive(Debug)]
pub(crate) enum NodeError
{
    /// An alias referenced an anchor never seen in this document.
    UndefinedAlias(Mark),
    /// An alias referenced an anchor whose node is still being composed.
    RecursiveAlias(Mark),
    /// Two nodes in the same document declared the same anchor name.
    DuplicateAnchor(Mark),
    /// Two explicit pairs in the same mapping resolved to equal keys.
    DuplicateKey(Mark),
    /// A `<<` merge key's value was not a mapping, or a sequence of
    /// mappings.
    BadMergeValue(Mark),
    /// `load_single` was handed a stream with more than one document.
    MultipleDocuments(Mark),
    /// `load_single` was handed a stream with no documents at all.
    NoDocument,

    Parser(ParseError),
    Scanner(ScanError),
}

impl From<ParseError> for NodeError
{
    fn from(e: ParseError) -> Self
    {
        Self::Parser(e)
    }
}

impl From<ScanError> for NodeError
{
    fn from(e: ScanError) -> Self
    {
        Self::Scanner(e)
    }
}

impl From<NodeError> for InternalError
{
    fn from(err: NodeError) -> Self
    {
        use NodeError::*;

        match err
        {
            UndefinedAlias(mark) => InternalError::with_mark(ErrorCode::UndefinedAlias, mark),
            RecursiveAlias(mark) => InternalError::with_mark(ErrorCode::RecursiveAlias, mark),
            DuplicateAnchor(mark) => InternalError::with_mark(ErrorCode::DuplicateAnchor, mark),
            DuplicateKey(mark) => InternalError::with_mark(ErrorCode::DuplicateKey, mark),
            BadMergeValue(mark) => InternalError::with_mark(ErrorCode::BadMergeValue, mark),
            MultipleDocuments(mark) => InternalError::with_mark(ErrorCode::MultipleDocuments, mark),
            NoDocument => InternalError::new(ErrorCode::NoDocument),
            Parser(e) => e.into(),
            Scanner(e) => e.into(),
        }
    }
}

impl From<NodeError> for crate::error::Error
{
    fn from(err: NodeError) -> Self
    {
        InternalError::from(err).into()
    }
}
