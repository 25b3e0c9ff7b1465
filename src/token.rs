/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The [`Token`] type produced by the [`Scanner`](crate::scanner::
//! Scanner), and the lightweight [`Marker`] tag used to compare token
//! kinds without inspecting their payload.

use crate::{mark::Mark, reader::Encoding};

/// Tokens that may be emitted by a YAML scanner.
///
/// Unlike the Reader's code points, Token payloads are owned `String`s:
/// the Reader materializes the whole document as a `Vec<char>` up
/// front, so there is no borrow to hold onto, and the Scanner's
/// retroactive token insertion (see [`crate::scanner`]) is simplest when
/// tokens are freestanding values.
#[derive(Debug, Clone, PartialEq)]
pub enum Token
{
    /// The stream's start, with the detected encoding. {virtual}
    StreamStart(Encoding),
    /// The stream's end. {virtual}
    StreamEnd,
    /// A `%YAML` / `%TAG` / unrecognized directive.
    ///
    /// `value` holds the directive's parameter text; `handle_end_index`
    /// is only meaningful for [`DirectiveKind::Tag`], splitting `value`
    /// into the tag handle (`value[..handle_end_index]`) and prefix
    /// (`value[handle_end_index..]`, with leading whitespace trimmed).
    Directive
    {
        name: String,
        value: String,
        handle_end_index: usize,
        kind: DirectiveKind,
    },
    /// A `---`
    DocumentStart,
    /// A `...`
    DocumentEnd,
    /// Indentation increase for a block sequence
    BlockSequenceStart,
    /// Indentation increase for a block mapping
    BlockMappingStart,
    /// Indentation decrease for a block collection
    BlockEnd,
    /// A `[`
    FlowSequenceStart,
    /// A `]`
    FlowSequenceEnd,
    /// A `{`
    FlowMappingStart,
    /// A `}`
    FlowMappingEnd,
    /// A `-`
    BlockEntry,
    /// A `,`
    FlowEntry,
    /// Either a `?` or nothing
    Key,
    /// A `:`
    Value,
    /// An alias (`*anchor`)
    Alias(String),
    /// An anchor (`&anchor`)
    Anchor(String),
    /// A tag (`value`, `handle_end_index`); see [`Token::Directive`] for
    /// how the split works.
    Tag(String, usize),
    /// A scalar (value, style). Quoted-scalar escapes are left
    /// undecoded in `value` -- see [`crate::scanner::scalar::escape`].
    Scalar(String, ScalarStyle),
}

impl Token
{
    /// The [`Marker`] identifying this token's kind.
    pub fn marker(&self) -> Marker
    {
        Marker::from(self)
    }
}

/// Which directive a [`Token::Directive`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind
{
    Yaml,
    Tag,
    Reserved,
}

/// A [`Token`] paired with its start and end [`Mark`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenEntry
{
    pub token:      Token,
    pub start_mark: Mark,
    pub end_mark:   Mark,
}

impl TokenEntry
{
    pub fn new(token: Token, start_mark: Mark, end_mark: Mark) -> Self
    {
        Self {
            token,
            start_mark,
            end_mark,
        }
    }

    pub fn marker(&self) -> Marker
    {
        self.token.marker()
    }
}

/// A fixed, closed set of discriminants mirroring [`Token`], letting
/// callers (and tests) compare token *kinds* without constructing or
/// matching on a full payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker
{
    StreamStart,
    StreamEnd,
    Directive,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Alias,
    Anchor,
    Tag,
    Scalar,
}

impl Marker
{
    fn from_token(t: &Token) -> Self
    {
        use Token::*;

        match t
        {
            StreamStart(_) => Self::StreamStart,
            StreamEnd => Self::StreamEnd,
            Directive { .. } => Self::Directive,
            DocumentStart => Self::DocumentStart,
            DocumentEnd => Self::DocumentEnd,
            BlockSequenceStart => Self::BlockSequenceStart,
            BlockMappingStart => Self::BlockMappingStart,
            BlockEnd => Self::BlockEnd,
            FlowSequenceStart => Self::FlowSequenceStart,
            FlowSequenceEnd => Self::FlowSequenceEnd,
            FlowMappingStart => Self::FlowMappingStart,
            FlowMappingEnd => Self::FlowMappingEnd,
            BlockEntry => Self::BlockEntry,
            FlowEntry => Self::FlowEntry,
            Key => Self::Key,
            Value => Self::Value,
            Alias(_) => Self::Alias,
            Anchor(_) => Self::Anchor,
            Tag(_, _) => Self::Tag,
            Scalar(_, _) => Self::Scalar,
        }
    }
}

impl Default for Marker
{
    fn default() -> Self
    {
        Self::StreamStart
    }
}

impl From<&'_ Token> for Marker
{
    fn from(t: &'_ Token) -> Self
    {
        Self::from_token(t)
    }
}

impl PartialEq<Token> for Marker
{
    fn eq(&self, other: &Token) -> bool
    {
        self == &Self::from(other)
    }
}

/// The style a [`Token::Scalar`] (and later, Event/Node) was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle
{
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle
{
    /// Quoted or plain scalars may carry an implicit (resolved) tag;
    /// block scalars (literal/folded) in this core are still eligible
    /// the same way -- only an explicit `!tag` ever overrides
    /// resolution, so this is currently always `true`. Kept as a method
    /// (rather than inlined at call sites) since the Parser's
    /// `implicit_pair` computation reads more clearly as `style.is_plain()`.
    pub fn is_plain(&self) -> bool
    {
        matches!(self, ScalarStyle::Plain)
    }
}
