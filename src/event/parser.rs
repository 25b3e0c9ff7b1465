/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The [`Parser`] struct, which turns a [`Scanner`]'s [`Token`] stream
//! into a stream of [`Event`]s.
//!
//! The two methods of interest are [`Parser::next_event`] and
//! [`Parser::into_iter`]; both take the driving [`Scanner`] as an
//! argument rather than owning it, so the same scanner can be peeked by
//! other callers (e.g. to inspect raw tokens) between events -- though
//! once a `Scanner` has produced a `Token::StreamEnd` to a `Parser` it
//! is a logic error to hand it to a second, fresh `Parser`.

use std::collections::HashMap;

use super::{
    error::{ParseError as Error, ParseResult as Result},
    state::{Flags, State, StateMachine, O_EMPTY, O_FIRST, O_IMPLICIT, O_NIL},
    types::{
        self, default_tags, empty_scalar, Directives, Event, EventData, NodeKind, TagDirectives,
        VersionDirective, DEFAULT_VERSION,
    },
};
use crate::{
    mark::Mark,
    reader::Reader,
    scanner::{
        error::{ScanError, ScanErrorKind},
        Scanner,
    },
    token::{DirectiveKind, Marker, Token, TokenEntry},
};

const BLOCK_CONTEXT: bool = true;

/// Translates a [`Scanner`]'s [`Token`] stream into [`Event`]s.
#[derive(Debug, Clone)]
pub(crate) struct Parser
{
    state:      StateMachine,
    directives: Directives,
    done:       bool,
}

impl Parser
{
    /// Instantiate a new [`Parser`], ready for a fresh token stream.
    pub fn new() -> Self
    {
        Self {
            state:      StateMachine::default(),
            directives: Directives::default(),
            done:       false,
        }
    }

    /// Fetch the next [`Event`] from `tokens`, or `None` once the
    /// stream is exhausted.
    pub fn next_event<R>(&mut self, tokens: &mut Scanner<R>) -> Option<Result<Event>>
    where
        R: Reader,
    {
        self.get_next_event(tokens).transpose()
    }

    /// Provides an [`Iterator`] interface over `tokens`.
    #[allow(clippy::wrong_self_convention)]
    pub fn into_iter<'a, 'b, R>(&'a mut self, tokens: &'b mut Scanner<R>) -> EventIter<'a, 'b, R>
    where
        R: Reader,
    {
        EventIter { parser: self, reader: tokens }
    }

    fn get_next_event<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let mut event = None;

        while !self.done && event.is_none()
        {
            event = self.state_transition(tokens)?;
        }

        Ok(event)
    }

    fn state_transition<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        match *self.state.top()
        {
            State::StreamStart => self.stream_start(tokens),
            State::DocumentStart(opts) => self.document_start(tokens, opts),
            State::DocumentContent => self.explicit_document_content(tokens),
            State::DocumentEnd => self.document_end(tokens),
            State::BlockNode => self.node(tokens, BLOCK_CONTEXT, NodeKind::Root),
            State::FlowNode => self.node(tokens, !BLOCK_CONTEXT, NodeKind::Root),
            State::BlockSequenceEntry(opts) => self.block_sequence_entry(tokens, opts),
            State::BlockMappingKey(opts) => self.block_mapping_key(tokens, opts),
            State::BlockMappingValue => self.block_mapping_value(tokens),
            State::FlowSequenceEntry(opts) => self.flow_sequence_entry(tokens, opts),
            State::FlowSequenceMappingKey => self.flow_sequence_entry_mapping_key(tokens),
            State::FlowSequenceMappingValue => self.flow_sequence_entry_mapping_value(tokens),
            State::FlowSequenceMappingEnd => self.flow_sequence_entry_mapping_end(tokens),
            State::FlowMappingKey(opts) => self.flow_mapping_key(tokens, opts),
            State::FlowMappingValue(opts) => self.flow_mapping_value(tokens, opts),

            State::StreamEnd => self.stream_end(tokens),
        }
    }

    fn stream_start<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let marker = peek_marker(tokens)?;

        let event = match marker
        {
            Marker::StreamStart =>
            {
                let entry = pop(tokens)?;
                Event::new(entry.start_mark, entry.end_mark, EventData::StreamStart)
            },
            _ => return Err(Error::UnexpectedEndOfStream),
        };

        self.state.set_top(State::DocumentStart(O_IMPLICIT | O_FIRST));

        Ok(Some(event))
    }

    fn stream_end<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        if self.done
        {
            return Ok(None);
        }

        let entry = pop(tokens)?;
        self.done = true;

        Ok(Some(Event::new(entry.start_mark, entry.end_mark, EventData::StreamEnd)))
    }

    fn document_start<R>(&mut self, tokens: &mut Scanner<R>, opts: Flags) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let mut event = None;
        let implicit = opts.contains(O_IMPLICIT);
        let first = opts.contains(O_FIRST);

        if !implicit
        {
            while peek_marker(tokens)? == Marker::DocumentEnd
            {
                pop(tokens)?;
            }
        }

        let marker = peek_marker(tokens)?;
        let markers = matches!(marker, Marker::Directive | Marker::DocumentStart | Marker::StreamEnd);

        if implicit && !markers
        {
            let (start, end, directives) = scan_document_directives(tokens)?;

            event = Some(Event::new(
                start,
                end,
                EventData::DocumentStart(types::DocumentStart {
                    directives: directives.clone(),
                    implicit: true,
                }),
            ));

            self.state.push(State::DocumentEnd);
            self.state.set_top(State::BlockNode);
            self.directives = directives;
        }
        else if !matches!(marker, Marker::StreamEnd)
        {
            let (start, _, directives) = scan_document_directives(tokens)?;

            let end = match peek_marker(tokens)?
            {
                Marker::DocumentStart => pop(tokens)?.end_mark,
                _ => return Err(Error::MissingDocumentStart(peek(tokens)?.0)),
            };

            event = Some(Event::new(
                start,
                end,
                EventData::DocumentStart(types::DocumentStart {
                    directives: directives.clone(),
                    implicit: false,
                }),
            ));

            self.state.push(State::DocumentEnd);
            self.state.set_top(State::DocumentContent);
            self.directives = directives;
        }
        else if first
        {
            let (start, end, directives) = scan_document_directives(tokens)?;

            event = Some(Event::new(
                start,
                end,
                EventData::DocumentStart(types::DocumentStart {
                    directives: directives.clone(),
                    implicit: true,
                }),
            ));

            self.state.set_top(State::DocumentEnd);
            self.directives = directives;
        }
        else
        {
            self.state.set_top(State::StreamEnd);
        }

        Ok(event)
    }

    fn document_end<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let (start, mut end, marker) = peek(tokens)?;
        let mut implicit = true;

        if matches!(marker, Marker::DocumentEnd)
        {
            implicit = false;
            end = pop(tokens)?.end_mark;
        }
        else
        {
            end = start;
        }

        let opts = if implicit { O_NIL } else { O_IMPLICIT };
        self.state.set_top(State::DocumentStart(opts));

        Ok(Some(Event::new(start, end, EventData::DocumentEnd(types::DocumentEnd { implicit }))))
    }

    fn explicit_document_content<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        use Marker::*;

        let marker = peek_marker(tokens)?;

        let empty = matches!(marker, Directive | DocumentStart | DocumentEnd | StreamEnd);

        if empty
        {
            self.state.pop();
            Ok(None)
        }
        else
        {
            self.node(tokens, BLOCK_CONTEXT, NodeKind::Root)
        }
    }

    fn block_sequence_entry<R>(
        &mut self,
        tokens: &mut Scanner<R>,
        opts: Flags,
    ) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Entry;

        if opts.contains(O_FIRST)
        {
            let marker = pop(tokens)?.marker();
            debug_assert!(matches!(marker, Marker::BlockSequenceStart));
        }

        let (start, end, marker) = peek(tokens)?;

        let event = match marker
        {
            Marker::BlockEntry =>
            {
                pop(tokens)?;

                match peek_marker(tokens)?
                {
                    Marker::BlockEntry | Marker::BlockEnd =>
                    {
                        self.state.set_top(State::BlockSequenceEntry(O_NIL));
                        Some(self.empty_scalar(end, kind))
                    },
                    _ =>
                    {
                        self.state.push(State::BlockSequenceEntry(O_NIL));
                        self.node(tokens, BLOCK_CONTEXT, kind)?
                    },
                }
            },
            Marker::BlockEnd =>
            {
                pop(tokens)?;
                self.state.pop();

                Some(Event::new(start, end, EventData::SequenceEnd))
            },
            _ => return Err(Error::MissingBlockEntry(start)),
        };

        Ok(event)
    }

    fn block_mapping_key<R>(&mut self, tokens: &mut Scanner<R>, opts: Flags) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Key;

        if opts.contains(O_FIRST)
        {
            let marker = peek_marker(tokens)?;
            debug_assert!(matches!(marker, Marker::BlockMappingStart));
            pop(tokens)?;
        }

        let (start, end, marker) = peek(tokens)?;

        let event = match marker
        {
            Marker::Key =>
            {
                pop(tokens)?;
                let (start, _, marker) = peek(tokens)?;

                if !matches!(marker, Marker::Key | Marker::Value | Marker::BlockEnd)
                {
                    self.state.push(State::BlockMappingValue);
                    self.node(tokens, BLOCK_CONTEXT, kind)?
                }
                else
                {
                    self.state.set_top(State::BlockMappingValue);
                    Some(self.empty_scalar(start, kind))
                }
            },
            Marker::BlockEnd =>
            {
                pop(tokens)?;
                self.state.pop();

                Some(Event::new(start, end, EventData::MappingEnd))
            },
            _ => return Err(Error::MissingKey(start)),
        };

        Ok(event)
    }

    fn block_mapping_value<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Value;
        let (_, end, marker) = peek(tokens)?;

        let event = match marker
        {
            Marker::Value =>
            {
                pop(tokens)?;
                let (_, end, marker) = peek(tokens)?;

                if !matches!(marker, Marker::Key | Marker::Value | Marker::BlockEnd)
                {
                    self.state.push(State::BlockMappingKey(O_NIL));
                    self.node(tokens, BLOCK_CONTEXT, kind)?
                }
                else
                {
                    self.state.set_top(State::BlockMappingKey(O_NIL));
                    Some(self.empty_scalar(end, kind))
                }
            },
            _ =>
            {
                self.state.set_top(State::BlockMappingKey(O_NIL));
                Some(self.empty_scalar(end, kind))
            },
        };

        Ok(event)
    }

    fn flow_sequence_entry<R>(&mut self, tokens: &mut Scanner<R>, opts: Flags) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Entry;
        let first = opts.contains(O_FIRST);

        if first
        {
            let marker = pop(tokens)?.marker();
            debug_assert!(matches!(marker, Marker::FlowSequenceStart));
        }

        let (start, end, marker) = peek(tokens)?;

        let event = if !matches!(marker, Marker::FlowSequenceEnd)
        {
            if !first
            {
                match marker
                {
                    Marker::FlowEntry =>
                    {
                        pop(tokens)?;
                    },
                    _ => return Err(Error::MissingFlowSequenceEntryOrEnd(start)),
                }
            }

            let (start, end, marker) = peek(tokens)?;

            match marker
            {
                Marker::Key =>
                {
                    pop(tokens)?;

                    self.state.set_top(State::FlowSequenceMappingKey);

                    Some(Event::new(
                        start,
                        end,
                        EventData::MappingStart(types::Node {
                            anchor:  None,
                            tag:     None,
                            content: types::Mapping,
                            kind:    NodeKind::Entry,
                        }),
                    ))
                },
                Marker::FlowSequenceEnd => Some(fetch_sequence_end(self, tokens, start, end)?),
                _ =>
                {
                    self.state.push(State::FlowSequenceEntry(O_NIL));
                    self.node(tokens, !BLOCK_CONTEXT, kind)?
                },
            }
        }
        else
        {
            Some(fetch_sequence_end(self, tokens, start, end)?)
        };

        Ok(event)
    }

    fn flow_sequence_entry_mapping_key<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Key;
        let (start, _, marker) = peek(tokens)?;

        let empty = matches!(marker, Marker::Value | Marker::FlowEntry | Marker::FlowSequenceEnd);

        let event = if !empty
        {
            self.state.push(State::FlowSequenceMappingValue);
            self.node(tokens, !BLOCK_CONTEXT, kind)?
        }
        else
        {
            self.state.set_top(State::FlowSequenceMappingValue);
            Some(self.empty_scalar(start, kind))
        };

        Ok(event)
    }

    fn flow_sequence_entry_mapping_value<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Value;
        let (start, _, marker) = peek(tokens)?;

        let event = if matches!(marker, Marker::Value)
        {
            pop(tokens)?;
            let next = peek_marker(tokens)?;

            if !matches!(next, Marker::FlowEntry | Marker::FlowSequenceEnd)
            {
                self.state.push(State::FlowSequenceMappingEnd);
                self.node(tokens, !BLOCK_CONTEXT, kind)?
            }
            else
            {
                self.state.set_top(State::FlowSequenceMappingEnd);
                Some(self.empty_scalar(start, kind))
            }
        }
        else
        {
            self.state.set_top(State::FlowSequenceMappingEnd);
            Some(self.empty_scalar(start, kind))
        };

        Ok(event)
    }

    fn flow_sequence_entry_mapping_end<R>(&mut self, tokens: &mut Scanner<R>) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let (start, end, marker) = peek(tokens)?;

        debug_assert!(matches!(marker, Marker::FlowEntry | Marker::FlowSequenceEnd));

        self.state.set_top(State::FlowSequenceEntry(O_NIL));

        Ok(Some(Event::new(start, end, EventData::MappingEnd)))
    }

    fn flow_mapping_key<R>(&mut self, tokens: &mut Scanner<R>, opts: Flags) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Key;
        let first = opts.contains(O_FIRST);

        if first
        {
            let marker = pop(tokens)?.marker();
            debug_assert!(matches!(marker, Marker::FlowMappingStart));
        }

        let (start, end, marker) = peek(tokens)?;

        let event = if !matches!(marker, Marker::FlowMappingEnd)
        {
            if !first
            {
                match marker
                {
                    Marker::FlowEntry =>
                    {
                        pop(tokens)?;
                    },
                    _ => return Err(Error::MissingFlowMappingEntryOrEnd(start)),
                }
            }

            let (start, end, marker) = peek(tokens)?;

            match marker
            {
                Marker::Key =>
                {
                    pop(tokens)?;
                    let (start, _, marker) = peek(tokens)?;

                    let empty =
                        matches!(marker, Marker::Value | Marker::FlowEntry | Marker::FlowMappingEnd);

                    if !empty
                    {
                        self.state.push(State::FlowMappingValue(O_NIL));
                        self.node(tokens, !BLOCK_CONTEXT, kind)?
                    }
                    else
                    {
                        self.state.set_top(State::FlowMappingValue(O_NIL));
                        Some(self.empty_scalar(start, kind))
                    }
                },
                Marker::FlowMappingEnd => Some(fetch_mapping_end(self, tokens, start, end)?),
                _ =>
                {
                    // `{ hello }` -- an implied key with no entry/value
                    // indicator at all.
                    self.state.push(State::FlowMappingValue(O_EMPTY));
                    self.node(tokens, !BLOCK_CONTEXT, kind)?
                },
            }
        }
        else
        {
            Some(fetch_mapping_end(self, tokens, start, end)?)
        };

        Ok(event)
    }

    fn flow_mapping_value<R>(&mut self, tokens: &mut Scanner<R>, opts: Flags) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let kind = NodeKind::Value;
        let (start, _, marker) = peek(tokens)?;

        let event = if opts.contains(O_EMPTY)
        {
            self.state.set_top(State::FlowMappingKey(O_NIL));
            self.empty_scalar(start, kind)
        }
        else if matches!(marker, Marker::Value)
        {
            pop(tokens)?;
            let (start, _, marker) = peek(tokens)?;

            if !matches!(marker, Marker::FlowEntry | Marker::FlowMappingEnd)
            {
                self.state.push(State::FlowMappingKey(O_NIL));
                match self.node(tokens, !BLOCK_CONTEXT, kind)?
                {
                    Some(event) => event,
                    None => unreachable!("node() only returns None for an implicit empty document"),
                }
            }
            else
            {
                self.state.set_top(State::FlowMappingKey(O_NIL));
                self.empty_scalar(start, kind)
            }
        }
        else
        {
            self.state.set_top(State::FlowMappingKey(O_NIL));
            self.empty_scalar(start, kind)
        };

        Ok(Some(event))
    }

    fn node<R>(&mut self, tokens: &mut Scanner<R>, block: bool, kind: NodeKind) -> Result<Option<Event>>
    where
        R: Reader,
    {
        let (mut start, mut end, marker) = peek(tokens)?;

        let event = if matches!(marker, Marker::Alias)
        {
            self.state.pop();

            let entry = pop(tokens)?;
            let name = match entry.token
            {
                Token::Alias(name) => name,
                _ => unreachable!("Marker::Alias token is always Token::Alias"),
            };

            Event::new(entry.start_mark, entry.end_mark, EventData::Alias(types::Alias { name }))
        }
        else
        {
            let mut anchor = None;
            let mut tag = None;

            match marker
            {
                Marker::Anchor =>
                {
                    anchor = fetch_anchor(tokens, &mut start, &mut end)?;
                    tag = fetch_tag(tokens, &mut start, &mut end)?;
                },
                Marker::Tag =>
                {
                    tag = fetch_tag(tokens, &mut start, &mut end)?;
                    anchor = fetch_anchor(tokens, &mut start, &mut end)?;
                },
                _ =>
                {},
            }

            let (_, end, marker) = peek(tokens)?;

            match marker
            {
                Marker::FlowSequenceStart =>
                {
                    self.state.set_top(State::FlowSequenceEntry(O_FIRST));

                    Event::new(
                        start,
                        end,
                        EventData::SequenceStart(types::Node {
                            anchor,
                            tag,
                            content: types::Sequence,
                            kind,
                        }),
                    )
                },
                Marker::FlowMappingStart =>
                {
                    self.state.set_top(State::FlowMappingKey(O_FIRST));

                    Event::new(
                        start,
                        end,
                        EventData::MappingStart(types::Node { anchor, tag, content: types::Mapping, kind }),
                    )
                },
                Marker::BlockSequenceStart if block =>
                {
                    self.state.set_top(State::BlockSequenceEntry(O_FIRST));

                    Event::new(
                        start,
                        end,
                        EventData::SequenceStart(types::Node {
                            anchor,
                            tag,
                            content: types::Sequence,
                            kind,
                        }),
                    )
                },
                Marker::BlockMappingStart if block =>
                {
                    self.state.set_top(State::BlockMappingKey(O_FIRST));

                    Event::new(
                        start,
                        end,
                        EventData::MappingStart(types::Node { anchor, tag, content: types::Mapping, kind }),
                    )
                },
                Marker::Scalar =>
                {
                    let entry = pop(tokens)?;
                    let scalar = match entry.token
                    {
                        Token::Scalar(data, style) => resolve_scalar(data, style),
                        _ => unreachable!("Marker::Scalar token is always Token::Scalar"),
                    };

                    self.state.pop();

                    Event::new(start, end, EventData::Scalar(types::Node { anchor, tag, content: scalar, kind }))
                },
                _ if anchor.is_some() || tag.is_some() =>
                {
                    self.state.pop();

                    Event::new(
                        start,
                        end,
                        EventData::Scalar(types::Node { anchor, tag, content: empty_scalar(), kind }),
                    )
                },
                _ => return Err(Error::MissingNode(start)),
            }
        };

        let mut event = event;
        validate_event_tag(&self.directives.tags, &mut event)?;

        Ok(Some(event))
    }

    fn empty_scalar(&mut self, mark: Mark, kind: NodeKind) -> Event
    {
        Event::new(
            mark,
            mark,
            EventData::Scalar(types::Node { anchor: None, tag: None, content: empty_scalar(), kind }),
        )
    }
}

impl Default for Parser
{
    fn default() -> Self
    {
        Self::new()
    }
}

/// A double-quoted scalar keeps its escapes raw until now; every other
/// style's content is already final.
fn resolve_scalar(data: String, style: crate::token::ScalarStyle) -> types::Scalar
{
    use crate::token::ScalarStyle;

    let data = match style
    {
        ScalarStyle::DoubleQuoted => crate::scanner::scalar::escape::unescape_double_quoted(&data),
        _ => data,
    };

    types::Scalar { data, style }
}

fn peek<R>(tokens: &mut Scanner<R>) -> Result<(Mark, Mark, Marker)>
where
    R: Reader,
{
    let entry = tokens.front()?;
    Ok((entry.start_mark, entry.end_mark, entry.marker()))
}

fn peek_marker<R>(tokens: &mut Scanner<R>) -> Result<Marker>
where
    R: Reader,
{
    Ok(tokens.front()?.marker())
}

fn pop<R>(tokens: &mut Scanner<R>) -> Result<TokenEntry>
where
    R: Reader,
{
    Ok(tokens.advance()?)
}

/// Fetch all adjacent directive tokens, merging the results with the
/// default `!`/`!!` tag handles, returning the span covered and the
/// resulting [`Directives`].
fn scan_document_directives<R>(tokens: &mut Scanner<R>) -> Result<(Mark, Mark, Directives)>
where
    R: Reader,
{
    let (start, mut end, _) = peek(tokens)?;

    let mut version = None;
    let mut tags: TagDirectives = HashMap::new();

    loop
    {
        if peek_marker(tokens)? != Marker::Directive
        {
            break;
        }

        let entry = pop(tokens)?;
        end = entry.end_mark;

        match entry.token
        {
            Token::Directive { value, handle_end_index, kind, .. } => match kind
            {
                DirectiveKind::Yaml =>
                {
                    if version.is_some()
                    {
                        return Err(Error::DuplicateVersion(entry.start_mark));
                    }

                    version = Some(parse_version(&value, handle_end_index, entry.start_mark)?);
                },
                DirectiveKind::Tag =>
                {
                    let (handle, prefix) = value.split_at(handle_end_index);
                    let handle = handle.to_string();
                    let prefix = prefix.trim_start().to_string();

                    if tags.contains_key(&handle)
                    {
                        return Err(Error::DuplicateTagDirective(entry.start_mark));
                    }

                    tags.insert(handle, prefix);
                },
                DirectiveKind::Reserved =>
                {},
            },
            _ => unreachable!("Marker::Directive token is always Token::Directive"),
        }
    }

    for (handle, prefix) in default_tags()
    {
        tags.entry(handle).or_insert(prefix);
    }

    Ok((start, end, Directives { version: version.unwrap_or(DEFAULT_VERSION), tags }))
}

fn parse_version(value: &str, dot_index: usize, mark: Mark) -> Result<VersionDirective>
{
    let parse = |s: &str| -> Result<u8> {
        s.parse().map_err(|_| Error::Scanner(ScanError::new(ScanErrorKind::IntOverflow, mark)))
    };

    Ok(VersionDirective { major: parse(&value[..dot_index])?, minor: parse(&value[dot_index + 1..])? })
}

fn fetch_anchor<R>(tokens: &mut Scanner<R>, start: &mut Mark, end: &mut Mark) -> Result<Option<String>>
where
    R: Reader,
{
    if peek_marker(tokens)? != Marker::Anchor
    {
        return Ok(None);
    }

    let entry = pop(tokens)?;
    *start = entry.start_mark;
    *end = entry.end_mark;

    match entry.token
    {
        Token::Anchor(name) => Ok(Some(name)),
        _ => unreachable!("Marker::Anchor token is always Token::Anchor"),
    }
}

fn fetch_tag<R>(
    tokens: &mut Scanner<R>,
    start: &mut Mark,
    end: &mut Mark,
) -> Result<Option<(String, String)>>
where
    R: Reader,
{
    if peek_marker(tokens)? != Marker::Tag
    {
        return Ok(None);
    }

    let entry = pop(tokens)?;
    *start = entry.start_mark;
    *end = entry.end_mark;

    match entry.token
    {
        Token::Tag(value, handle_end_index) =>
        {
            let (handle, suffix) = value.split_at(handle_end_index);
            Ok(Some((handle.to_string(), suffix.to_string())))
        },
        _ => unreachable!("Marker::Tag token is always Token::Tag"),
    }
}

fn fetch_sequence_end<R>(this: &mut Parser, tokens: &mut Scanner<R>, start: Mark, end: Mark) -> Result<Event>
where
    R: Reader,
{
    this.state.pop();
    pop(tokens)?;

    Ok(Event::new(start, end, EventData::SequenceEnd))
}

fn fetch_mapping_end<R>(this: &mut Parser, tokens: &mut Scanner<R>, start: Mark, end: Mark) -> Result<Event>
where
    R: Reader,
{
    this.state.pop();
    pop(tokens)?;

    Ok(Event::new(start, end, EventData::MappingEnd))
}

/// Ensure any tag attached to `event`'s node is either a resolvable
/// handle present in `tags`, or drop it if it's the non-resolvable `!`
/// tag on a scalar.
fn validate_event_tag(tags: &TagDirectives, event: &mut Event) -> Result<()>
{
    let mark = event.start();

    match event.data_mut()
    {
        EventData::Scalar(node) => validate_tag(tags, &mut node.tag, true, mark),
        EventData::SequenceStart(node) => validate_tag(tags, &mut node.tag, false, mark),
        EventData::MappingStart(node) => validate_tag(tags, &mut node.tag, false, mark),
        _ => Ok(()),
    }
}

fn validate_tag(
    tags: &TagDirectives,
    tag: &mut Option<(String, String)>,
    scalar: bool,
    mark: Mark,
) -> Result<()>
{
    if let Some((handle, suffix)) = tag.as_ref()
    {
        let resolvable = !(handle == "!" && suffix.is_empty());

        match (scalar, resolvable)
        {
            (false, _) | (true, true) =>
            {
                if !tags.contains_key(handle)
                {
                    return Err(Error::UndefinedTag(mark));
                }
            },
            (true, false) => *tag = None,
        }
    }

    Ok(())
}

/// [`Iterator`] interface over a [`Parser`]'s events.
#[derive(Debug)]
pub(crate) struct EventIter<'a, 'b, R>
{
    parser: &'a mut Parser,
    reader: &'b mut Scanner<R>,
}

impl<'a, 'b, R> Iterator for EventIter<'a, 'b, R>
where
    R: Reader,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.parser.next_event(self.reader)
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::from_utf8;

    fn events(yaml: &str) -> Vec<EventData>
    {
        let mut scanner = Scanner::new(from_utf8(yaml));
        let mut parser = Parser::new();
        let mut out = Vec::new();

        while let Some(event) = parser.next_event(&mut scanner)
        {
            out.push(event.expect("valid document").into_data());
        }

        out
    }

    #[test]
    fn empty_stream_is_four_events()
    {
        let data = events("");

        assert!(matches!(data[0], EventData::StreamStart));
        assert!(matches!(data[1], EventData::DocumentStart(_)));
        assert!(matches!(data[2], EventData::DocumentEnd(_)));
        assert!(matches!(data[3], EventData::StreamEnd));
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn plain_scalar_document()
    {
        let data = events("42");

        match &data[2]
        {
            EventData::Scalar(node) => assert_eq!(node.content.data, "42"),
            other => panic!("expected Scalar, got {other:?}"),
        }
    }

    #[test]
    fn simple_mapping_preserves_order()
    {
        let data = events("a: 1\nb: 2\n");

        let keys: Vec<&str> = data
            .iter()
            .filter_map(|e| match e
            {
                EventData::Scalar(node) if node.kind == NodeKind::Key => Some(node.content.data.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn double_quoted_scalar_is_unescaped()
    {
        let data = events(r#""a\nb""#);

        match &data[2]
        {
            EventData::Scalar(node) => assert_eq!(node.content.data, "a\nb"),
            other => panic!("expected Scalar, got {other:?}"),
        }
    }

    #[test]
    fn undefined_tag_handle_errors()
    {
        let mut scanner = Scanner::new(from_utf8("!unknown!value foo\n"));
        let mut parser = Parser::new();
        let mut last = None;

        while let Some(event) = parser.next_event(&mut scanner)
        {
            match event
            {
                Ok(e) => last = Some(Ok(e.into_data())),
                Err(e) =>
                {
                    last = Some(Err(e));
                    break;
                },
            }
        }

        assert!(matches!(last, Some(Err(Error::UndefinedTag(_)))));
    }

    #[test]
    fn flow_sequence_of_scalars()
    {
        let data = events("[1, 2, 3]");

        assert!(matches!(data[2], EventData::SequenceStart(_)));
        assert!(matches!(data[6], EventData::SequenceEnd));
    }
}
