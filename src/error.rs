/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Opaque, public error type shared by every stage of the pipeline.
//!
//! Every error produced by the Scanner, Parser or Composer is a *marked*
//! error: a problem message + mark, optionally preceded by a context
//! message + mark (e.g. "while scanning a quoted scalar" at the mark where
//! the scalar began, "found unexpected end of stream" at the mark where it
//! actually ended).

use std::{error::Error as StdError, fmt};

use crate::mark::Mark;

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can occur during
/// library usage.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The mark at which the underlying problem was found.
    pub fn problem_mark(&self) -> Option<Mark>
    {
        self.inner.problem_mark
    }

    /// A human readable description of the problem.
    pub fn problem(&self) -> String
    {
        self.inner.kind.to_string()
    }

    /// A human readable description of what the pipeline was doing when it
    /// encountered the problem (e.g. `"while scanning a quoted scalar"`),
    /// if one was attached.
    pub fn context(&self) -> Option<&'static str>
    {
        self.inner.context.map(|c| c.message)
    }

    /// The mark at which the above context began.
    pub fn context_mark(&self) -> Option<Mark>
    {
        self.inner.context.map(|c| c.mark)
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was syntactically invalid
    /// - [`Category::Semantic`] The YAML stream was syntactically valid
    ///   but violated a composition-time rule (duplicate key, recursive
    ///   alias, ...)
    /// - [`Category::IO`] The underlying byte stream surfaced an error
    ///   while doing IO
    /// - [`Category::EOF`] The YAML stream ended unexpectedly
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    pub(crate) fn new(err: internal::Error) -> Self
    {
        Self {
            inner: Box::new(err),
        }
    }
}

/// Rough category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The underlying byte stream returned an error while attempting IO
    IO,
    /// The YAML stream was not syntactically valid (Scanner or Parser)
    Syntax,
    /// The YAML stream was syntactically valid but violated a
    /// composition-time semantic rule (Composer)
    Semantic,
    /// The YAML stream unexpectedly terminated before it was appropriate
    /// to do so
    EOF,
}

pub(crate) mod internal
{
    use std::{error::Error as StdError, fmt, str::Utf8Error};

    use super::Category;
    use crate::mark::Mark;

    /// Internal error representation, carrying enough positional metadata
    /// to be contextualized into a public [`Error`](super::Error).
    pub(crate) struct Error
    {
        pub kind:         ErrorKind,
        pub problem_mark: Option<Mark>,
        pub context:      Option<Context>,
    }

    #[derive(Clone, Copy)]
    pub(crate) struct Context
    {
        pub message: &'static str,
        pub mark:    Mark,
    }

    impl Error
    {
        pub fn new<T>(kind: T) -> Self
        where
            T: Into<ErrorKind>,
        {
            Self {
                kind: kind.into(),
                problem_mark: None,
                context: None,
            }
        }

        pub fn with_mark<T>(kind: T, problem_mark: Mark) -> Self
        where
            T: Into<ErrorKind>,
        {
            Self {
                kind: kind.into(),
                problem_mark: Some(problem_mark),
                context: None,
            }
        }

        /// Attach context describing what the pipeline was doing when
        /// `.problem_mark` was hit. Replaces any existing context.
        pub fn context(mut self, message: &'static str, mark: Mark) -> Self
        {
            self.context = Some(Context { message, mark });
            self
        }

        pub fn classify(&self) -> Category
        {
            Into::into(&self.kind)
        }
    }

    /// Unified wrapper around the actual error variants we can produce
    #[derive(Debug)]
    pub(crate) enum ErrorKind
    {
        Code(ErrorCode),
        Source(SourceError),
    }

    /// Lightweight errors, specific to this library. Never wraps an
    /// underlying error -- use [`SourceError`] for those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) enum ErrorCode
    {
        /*
         * ==== Scanner errors ====
         */
        UnexpectedEOF,
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
        IntOverflow,
        /// A simple key candidate expired (line changed, or more than 1024
        /// characters were read) while still `required`
        KeyTooLong,
        /// A quoted or block scalar was not terminated before EOF
        UnterminatedScalar,
        /// `%XX` decoded to bytes that were not valid UTF8
        InvalidUriEscape,

        /*
         * ==== Parser errors ====
         */
        CorruptStream,
        DuplicateVersion,
        DuplicateTagDirective,
        UndefinedTag,
        MissingDocumentStart,
        MissingBlockEntry,
        MissingNode,
        MissingKey,
        MissingFlowSequenceEntryOrEnd,
        MissingFlowMappingEntryOrEnd,
        UnexpectedToken,

        /*
         * ==== Composer errors ====
         */
        UndefinedAlias,
        RecursiveAlias,
        DuplicateAnchor,
        DuplicateKey,
        BadMergeValue,
        MultipleDocuments,
        NoDocument,
    }

    /// Heavy and/or external errors that can occur during library usage
    #[derive(Debug)]
    pub(crate) enum SourceError
    {
        IO(std::io::Error),
        UTF8(Utf8Error),
    }

    impl fmt::Debug for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            let mut this = f.debug_struct("Error");
            this.field("kind", &self.kind);
            if let Some(mark) = self.problem_mark
            {
                this.field("problem_mark", &mark);
            }
            if let Some(ref cxt) = self.context
            {
                this.field("context", &cxt.message).field("context_mark", &cxt.mark);
            }
            this.finish()
        }
    }

    impl fmt::Display for Error
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            if let Some(ref cxt) = self.context
            {
                write!(f, "{}, {}; ", cxt.message, cxt.mark)?;
            }

            write!(f, "{}", self.kind)?;

            if let Some(mark) = self.problem_mark
            {
                write!(f, ", {}", mark)?;
            }

            Ok(())
        }
    }

    impl StdError for Error
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            StdError::source(&self.kind)
        }
    }

    impl From<Error> for super::Error
    {
        fn from(err: Error) -> Self
        {
            Self::new(err)
        }
    }

    impl<T> From<T> for Error
    where
        T: Into<ErrorKind>,
    {
        fn from(t: T) -> Self
        {
            Error::new(t)
        }
    }

    impl From<&'_ ErrorKind> for Category
    {
        fn from(kind: &'_ ErrorKind) -> Self
        {
            match kind
            {
                ErrorKind::Code(e) => e.into(),
                ErrorKind::Source(e) => e.into(),
            }
        }
    }

    impl fmt::Display for ErrorKind
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                ErrorKind::Code(ref e) => fmt::Display::fmt(e, f),
                ErrorKind::Source(ref e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for ErrorKind {}

    impl From<ErrorCode> for ErrorKind
    {
        fn from(e: ErrorCode) -> Self
        {
            ErrorKind::Code(e)
        }
    }

    impl From<SourceError> for ErrorKind
    {
        fn from(e: SourceError) -> Self
        {
            ErrorKind::Source(e)
        }
    }

    impl From<ErrorCode> for Category
    {
        fn from(code: ErrorCode) -> Self
        {
            use ErrorCode::*;

            match code
            {
                UndefinedAlias | RecursiveAlias | DuplicateAnchor | DuplicateKey
                | BadMergeValue | MultipleDocuments | NoDocument => Category::Semantic,

                UnexpectedEOF => Category::EOF,

                _ => Category::Syntax,
            }
        }
    }

    impl From<&'_ ErrorCode> for Category
    {
        fn from(code: &'_ ErrorCode) -> Self
        {
            From::from(*code)
        }
    }

    impl fmt::Display for ErrorCode
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            use ErrorCode::*;

            let msg = match self
            {
                UnexpectedEOF => "unexpected end of stream",
                UnknownDirective => "unknown directive, expected YAML or TAG",
                MissingMajor => "%YAML directive missing major version",
                MissingMinor => "%YAML directive missing minor version",
                MissingValue => "missing YAML mapping value",
                InvalidVersion => "%YAML directive is invalid",
                InvalidTagHandle => "tag handle is not one of !, !! or ![a-zA-Z0-9]+!",
                InvalidTagPrefix => "%TAG directive prefix is invalid",
                InvalidTagSuffix => "node tag suffix is invalid",
                InvalidAnchorName => "anchor or alias name contains invalid characters",
                InvalidFlowScalar => "flow scalar contains invalid characters",
                InvalidPlainScalar => "plain scalar contains invalid characters",
                InvalidBlockScalar => "block scalar contains invalid characters",
                InvalidBlockEntry => "block entry is not allowed in this context",
                InvalidTab => "tab character found in indentation",
                InvalidKey => "mapping key is not allowed in this context",
                InvalidValue => "mapping value is not allowed in this context",
                UnknownEscape => "unknown escape sequence",
                UnknownDelimiter => "found character that cannot start a token",
                IntOverflow => "integer overflowed while parsing",
                KeyTooLong => "could not find expected ':'",
                UnterminatedScalar => "scalar was not terminated before end of stream",
                InvalidUriEscape => "%-escape did not decode to valid UTF8",

                CorruptStream => "parser token stream is corrupt or out of sync",
                DuplicateVersion => "duplicate %YAML directive found in a document",
                DuplicateTagDirective => "duplicate %TAG directive for a handle found in a document",
                UndefinedTag => "undefined tag handle",
                MissingDocumentStart => "expected '<document start>'",
                MissingBlockEntry => "expected a block entry",
                MissingNode => "expected a node, but found none",
                MissingKey => "expected a mapping key",
                MissingFlowSequenceEntryOrEnd => "missing flow sequence delimiter ',' or ']'",
                MissingFlowMappingEntryOrEnd => "missing flow mapping delimiter ',' or '}'",
                UnexpectedToken => "unexpected token",

                UndefinedAlias => "found undefined alias",
                RecursiveAlias => "found recursive alias",
                DuplicateAnchor => "found duplicate anchor",
                DuplicateKey => "duplicate key found in mapping",
                BadMergeValue => "expected a mapping or a list of mappings for merging",
                MultipleDocuments => "expected a single document, found another",
                NoDocument => "expected a document, found none",
            };

            f.write_str(msg)
        }
    }

    impl StdError for ErrorCode {}

    impl From<&'_ SourceError> for Category
    {
        fn from(err: &'_ SourceError) -> Self
        {
            match err
            {
                SourceError::IO(_) => Category::IO,
                SourceError::UTF8(_) => Category::Syntax,
            }
        }
    }

    impl fmt::Display for SourceError
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            match self
            {
                SourceError::IO(ref e) => fmt::Display::fmt(e, f),
                SourceError::UTF8(ref e) => fmt::Display::fmt(e, f),
            }
        }
    }

    impl StdError for SourceError
    {
        fn source(&self) -> Option<&(dyn StdError + 'static)>
        {
            match self
            {
                SourceError::IO(e) => Some(e),
                SourceError::UTF8(e) => Some(e),
            }
        }
    }

    impl From<Utf8Error> for SourceError
    {
        fn from(e: Utf8Error) -> Self
        {
            SourceError::UTF8(e)
        }
    }

    impl From<std::io::Error> for SourceError
    {
        fn from(e: std::io::Error) -> Self
        {
            SourceError::IO(e)
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        StdError::source(&self.inner)
    }
}
