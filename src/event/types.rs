/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The various types used by [Event]s to represent YAML.

use std::collections::HashMap;

use crate::{mark::Mark, token::ScalarStyle};

/// Default tag directives applied to every YAML document.
///
/// Equivalent of:
///
/// ```yaml
/// %TAG !    !
/// %TAG !!   tag:yaml.org,2002:
/// ```
///
/// These are always in scope, though documents may expressly override
/// them.
pub(crate) fn default_tags() -> TagDirectives
{
    let mut tags = HashMap::new();
    tags.insert(String::from("!"), String::from("!"));
    tags.insert(String::from("!!"), String::from("tag:yaml.org,2002:"));
    tags
}

/// Default YAML stream version, assumed when unspecified.
///
/// Equivalent of:
///
/// ```yaml
/// %YAML 1.1
/// ```
pub(crate) const DEFAULT_VERSION: VersionDirective = VersionDirective { major: 1, minor: 1 };

/// An empty YAML scalar, implied by the stream in several productions
/// (an entry with no content, a key with no value, ...).
pub(crate) fn empty_scalar() -> Scalar
{
    Scalar {
        data:  String::new(),
        style: ScalarStyle::Plain,
    }
}

/// A specific YAML production found in the token stream. Each [`Event`]
/// carries a start and end [`Mark`] bracketing the span it covers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Event
{
    start: Mark,
    end:   Mark,
    inner: EventData,
}

impl Event
{
    pub fn new(start: Mark, end: Mark, event: EventData) -> Self
    {
        Self { start, end, inner: event }
    }

    pub fn start(&self) -> Mark
    {
        self.start
    }

    pub fn end(&self) -> Mark
    {
        self.end
    }

    pub fn data(&self) -> &EventData
    {
        &self.inner
    }

    pub fn data_mut(&mut self) -> &mut EventData
    {
        &mut self.inner
    }

    pub fn into_data(self) -> EventData
    {
        self.inner
    }
}

/// Possible variants of an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EventData
{
    /// Beginning of the event stream, always the first event produced.
    StreamStart,
    /// End of events, always the last event produced.
    StreamEnd,

    /// Start of a document's content. Events until the matching
    /// [`EventData::DocumentEnd`] belong to this document's scope, and
    /// tag resolution should use the attached directives.
    DocumentStart(DocumentStart),
    /// End of a document's content.
    DocumentEnd(DocumentEnd),

    /// An alias, referring to a previously seen anchor.
    Alias(Alias),
    /// A scalar leaf node.
    Scalar(Node<Scalar>),

    /// Start of a mapping, followed by key/value node pairs until a
    /// matching [`EventData::MappingEnd`].
    MappingStart(Node<Mapping>),
    /// End of a mapping.
    MappingEnd,
    /// Start of a sequence, followed by entry nodes until a matching
    /// [`EventData::SequenceEnd`].
    SequenceStart(Node<Sequence>),
    /// End of a sequence.
    SequenceEnd,
}

/// Wrapper around [`Event`] variants that correspond to a YAML node
/// production -- those that may carry tags or anchors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node<T>
{
    /// The anchor attached to this node, if any.
    pub anchor: Option<String>,
    /// The resolved tag attached to this node, if any.
    pub tag:    Option<(String, String)>,
    /// The node's content, or a marker type for complex structures.
    pub content: T,
    /// This node's position in its parent structure.
    pub kind:   NodeKind,
}

/// A YAML scalar's content and style.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scalar
{
    pub data:  String,
    pub style: ScalarStyle,
}

/// Contextual information about a [`Node`]'s position in the YAML
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind
{
    /// The top level node of a document.
    Root,
    /// An entry in a sequence.
    Entry,
    /// A key in a mapping.
    Key,
    /// A value in a mapping.
    Value,
}

/// [`EventData::DocumentStart`] contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentStart
{
    pub directives: Directives,
    /// Was this start present in the stream, or inferred?
    pub implicit:   bool,
}

/// [`EventData::DocumentEnd`] contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentEnd
{
    pub implicit: bool,
}

/// [`EventData::Alias`] contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Alias
{
    pub name: String,
}

/// [`EventData::MappingStart`] marker type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mapping;
/// [`EventData::SequenceStart`] marker type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sequence;

/// Directives in scope for a document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Directives
{
    pub version: VersionDirective,
    pub tags:    TagDirectives,
}

impl Default for Directives
{
    fn default() -> Self
    {
        Self {
            version: DEFAULT_VERSION,
            tags:    default_tags(),
        }
    }
}

/// A `%YAML major.minor` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VersionDirective
{
    pub major: u8,
    pub minor: u8,
}

/// Map of tag handle -> prefix in scope for the current document.
pub(crate) type TagDirectives = HashMap<String, String>;
