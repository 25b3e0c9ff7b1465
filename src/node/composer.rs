/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Turns one [`Parser`]'s event stream into a sequence of [`Node`] trees,
//! one per document: resolves tags, tracks anchors for alias resolution,
//! and flattens merge keys.

use std::collections::HashMap;

use super::{
    constructor::{Constructor, RawValue},
    error::{NodeError as Error, NodeResult as Result},
    graph::{Graph, NodeIndex},
    resolver::{NodeKind, Resolver},
    types::Node,
};
use crate::{
    event::{
        types::{Event, EventData, TagDirectives},
        Parser,
    },
    mark::Mark,
    reader::Reader,
    scanner::Scanner,
};

enum AnchorSlot
{
    /// On the composition stack; resolving an alias against this entry is
    /// a recursive-alias error.
    Pending,
    Ready(NodeIndex),
}

/// Composes one [`Parser`]'s events into a [`Node`] tree per document.
pub(crate) struct Composer
{
    graph:   Graph,
    anchors: HashMap<String, AnchorSlot>,
    tags:    TagDirectives,
    started: bool,
}

impl Composer
{
    pub fn new() -> Self
    {
        Self {
            graph:   Graph::new(),
            anchors: HashMap::new(),
            tags:    TagDirectives::default(),
            started: false,
        }
    }

    /// Compose the next document in `tokens`, or `None` once the stream is
    /// exhausted.
    pub fn next_document<R>(
        &mut self,
        parser: &mut Parser,
        tokens: &mut Scanner<R>,
        resolver: &dyn Resolver,
        constructor: &dyn Constructor,
    ) -> Result<Option<Node>>
    where
        R: Reader,
    {
        if !self.started
        {
            let event = self.pull(parser, tokens)?;
            debug_assert!(matches!(event.data(), EventData::StreamStart));
            self.started = true;
        }

        let event = self.pull(parser, tokens)?;

        let directives = match event.into_data()
        {
            EventData::StreamEnd => return Ok(None),
            EventData::DocumentStart(start) => start.directives,
            _ => unreachable!("composer expects DocumentStart or StreamEnd after a document"),
        };

        self.anchors.clear();
        self.graph.clear();
        self.tags = directives.tags;

        let root = self.compose_node(parser, tokens, resolver, constructor)?;
        let node = self.graph.materialize(root);

        let end = self.pull(parser, tokens)?;
        debug_assert!(matches!(end.data(), EventData::DocumentEnd(_)));

        self.anchors.clear();

        Ok(Some(node))
    }

    fn pull<R>(&mut self, parser: &mut Parser, tokens: &mut Scanner<R>) -> Result<Event>
    where
        R: Reader,
    {
        let event = match parser.next_event(tokens)
        {
            Some(event) => event,
            None => unreachable!("Parser never yields None before StreamEnd"),
        };

        Ok(event?)
    }

    fn expand_tag(&self, handle: &str, suffix: &str) -> String
    {
        let prefix = self.tags.get(handle).cloned().unwrap_or_else(|| handle.to_string());
        format!("{prefix}{suffix}")
    }

    fn compose_node<R>(
        &mut self,
        parser: &mut Parser,
        tokens: &mut Scanner<R>,
        resolver: &dyn Resolver,
        constructor: &dyn Constructor,
    ) -> Result<NodeIndex>
    where
        R: Reader,
    {
        let event = self.pull(parser, tokens)?;
        self.compose_value(event, parser, tokens, resolver, constructor)
    }

    fn compose_value<R>(
        &mut self,
        event: Event,
        parser: &mut Parser,
        tokens: &mut Scanner<R>,
        resolver: &dyn Resolver,
        constructor: &dyn Constructor,
    ) -> Result<NodeIndex>
    where
        R: Reader,
    {
        let start = event.start();
        let end = event.end();

        if let EventData::Alias(alias) = event.data()
        {
            return match self.anchors.get(&alias.name)
            {
                None => Err(Error::UndefinedAlias(start)),
                Some(AnchorSlot::Pending) => Err(Error::RecursiveAlias(start)),
                Some(AnchorSlot::Ready(idx)) => Ok(*idx),
            };
        }

        let anchor = match event.data()
        {
            EventData::Scalar(node) => node.anchor.clone(),
            EventData::SequenceStart(node) => node.anchor.clone(),
            EventData::MappingStart(node) => node.anchor.clone(),
            _ => unreachable!("compose_value called on a non-node event"),
        };

        if let Some(name) = &anchor
        {
            if self.anchors.contains_key(name)
            {
                return Err(Error::DuplicateAnchor(start));
            }

            self.anchors.insert(name.clone(), AnchorSlot::Pending);
        }

        let idx = match event.into_data()
        {
            EventData::Scalar(node) =>
            {
                let tag = node.tag.as_ref().map(|(h, s)| self.expand_tag(h, s));
                let implicit = tag.is_none() && node.content.style.is_plain();
                let resolved = resolver.resolve(
                    NodeKind::Scalar,
                    tag.as_deref(),
                    Some(&node.content.data),
                    implicit,
                );

                let raw = RawValue { data: &node.content.data, style: node.content.style };
                let data = constructor.construct(&resolved, raw);

                Ok(self.graph.insert_scalar(resolved, start, end, data, node.content.style))
            },
            EventData::SequenceStart(node) =>
            {
                let tag = node.tag.as_ref().map(|(h, s)| self.expand_tag(h, s));
                let resolved = resolver.resolve(NodeKind::Sequence, tag.as_deref(), None, true);

                self.compose_sequence(resolved, start, end, parser, tokens, resolver, constructor)
            },
            EventData::MappingStart(node) =>
            {
                let tag = node.tag.as_ref().map(|(h, s)| self.expand_tag(h, s));
                let resolved = resolver.resolve(NodeKind::Mapping, tag.as_deref(), None, true);

                self.compose_mapping(resolved, start, end, parser, tokens, resolver, constructor)
            },
            _ => unreachable!("compose_value called on a non-node event"),
        }?;

        if let Some(name) = anchor
        {
            self.anchors.insert(name, AnchorSlot::Ready(idx));
        }

        Ok(idx)
    }

    fn compose_sequence<R>(
        &mut self,
        tag: String,
        start: Mark,
        end: Mark,
        parser: &mut Parser,
        tokens: &mut Scanner<R>,
        resolver: &dyn Resolver,
        constructor: &dyn Constructor,
    ) -> Result<NodeIndex>
    where
        R: Reader,
    {
        let idx = self.graph.insert_sequence(tag, start, end);

        loop
        {
            let event = self.pull(parser, tokens)?;

            if matches!(event.data(), EventData::SequenceEnd)
            {
                break;
            }

            let entry = self.compose_value(event, parser, tokens, resolver, constructor)?;
            self.graph.push_sequence_entry(idx, entry);
        }

        Ok(idx)
    }

    fn compose_mapping<R>(
        &mut self,
        tag: String,
        start: Mark,
        end: Mark,
        parser: &mut Parser,
        tokens: &mut Scanner<R>,
        resolver: &dyn Resolver,
        constructor: &dyn Constructor,
    ) -> Result<NodeIndex>
    where
        R: Reader,
    {
        let idx = self.graph.insert_mapping(tag, start, end);

        let mut explicit: Vec<(NodeIndex, NodeIndex)> = Vec::new();
        let mut merges: Vec<(Mark, NodeIndex)> = Vec::new();

        loop
        {
            let key_event = self.pull(parser, tokens)?;

            if matches!(key_event.data(), EventData::MappingEnd)
            {
                break;
            }

            let key_mark = key_event.start();
            let key_idx = self.compose_value(key_event, parser, tokens, resolver, constructor)?;

            let value_event = self.pull(parser, tokens)?;
            let value_idx = self.compose_value(value_event, parser, tokens, resolver, constructor)?;

            if constructor.is_merge_key(self.graph.tag(key_idx))
            {
                merges.push((key_mark, value_idx));
            }
            else
            {
                explicit.push((key_idx, value_idx));
            }
        }

        for pair in &explicit
        {
            let dup = explicit.iter().filter(|other| self.graph.nodes_equal(other.0, pair.0)).count();

            if dup > 1
            {
                return Err(Error::DuplicateKey(start));
            }
        }

        let mut pairs = explicit.clone();

        for (mark, value) in merges
        {
            for (key, value) in self.flatten_merge_value(mark, value)?
            {
                if !pairs.iter().any(|(k, _)| self.graph.nodes_equal(*k, key))
                {
                    pairs.push((key, value));
                }
            }
        }

        self.graph.set_mapping_pairs(idx, pairs);

        Ok(idx)
    }

    /// Flatten a merge key's value into an ordered pair list: a mapping
    /// contributes its own pairs, a sequence of mappings contributes each
    /// member's pairs in order (each recursively flattened, depth-first,
    /// left to right), anything else is an error.
    fn flatten_merge_value(&self, mark: Mark, value: NodeIndex) -> Result<Vec<(NodeIndex, NodeIndex)>>
    {
        if let Some(pairs) = self.as_mapping(value)
        {
            return Ok(pairs.to_vec());
        }

        if let Some(entries) = self.as_sequence(value)
        {
            let mut out = Vec::new();

            for &entry in entries
            {
                if self.as_mapping(entry).is_none()
                {
                    return Err(Error::BadMergeValue(mark));
                }

                out.extend(self.flatten_merge_value(mark, entry)?);
            }

            return Ok(out);
        }

        Err(Error::BadMergeValue(mark))
    }

    fn as_mapping(&self, idx: NodeIndex) -> Option<&[(NodeIndex, NodeIndex)]>
    {
        self.graph.try_mapping_pairs(idx)
    }

    fn as_sequence(&self, idx: NodeIndex) -> Option<&[NodeIndex]>
    {
        self.graph.try_sequence_entries(idx)
    }
}

impl Default for Composer
{
    fn default() -> Self
    {
        Self::new()
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        node::{constructor::CoreConstructor, resolver::CoreResolver},
        reader::from_utf8,
    };

    fn documents(yaml: &str) -> Vec<Node>
    {
        let mut scanner = Scanner::new(from_utf8(yaml));
        let mut parser = Parser::new();
        let mut composer = Composer::new();
        let resolver = CoreResolver;
        let constructor = CoreConstructor;
        let mut out = Vec::new();

        while let Some(node) = composer
            .next_document(&mut parser, &mut scanner, &resolver, &constructor)
            .expect("valid document")
        {
            out.push(node);
        }

        out
    }

    fn one(yaml: &str) -> Node
    {
        let mut docs = documents(yaml);
        assert_eq!(docs.len(), 1);
        docs.remove(0)
    }

    #[test]
    fn plain_scalar_resolves_int_tag()
    {
        let node = one("42\n");

        assert_eq!(node.tag(), "tag:yaml.org,2002:int");
        assert_eq!(node.as_scalar(), Some("42"));
    }

    #[test]
    fn mapping_preserves_key_order()
    {
        let node = one("b: 2\na: 1\n");
        let pairs = node.as_mapping().expect("mapping");

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.as_scalar(), Some("b"));
        assert_eq!(pairs[1].0.as_scalar(), Some("a"));
    }

    #[test]
    fn two_documents_compose_independently()
    {
        let docs = documents("---\n1\n---\n2\n");

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].as_scalar(), Some("1"));
        assert_eq!(docs[1].as_scalar(), Some("2"));
    }

    #[test]
    fn anchor_and_alias_share_identity()
    {
        let node = one("- &a 1\n- *a\n");
        let items = node.as_sequence().expect("sequence");

        assert_eq!(items.len(), 2);
        assert!(items[0].is_same_as(&items[1]));
    }

    #[test]
    fn recursive_alias_errors()
    {
        let mut scanner = Scanner::new(from_utf8("&a [ *a ]\n"));
        let mut parser = Parser::new();
        let mut composer = Composer::new();
        let resolver = CoreResolver;
        let constructor = CoreConstructor;

        let err = composer
            .next_document(&mut parser, &mut scanner, &resolver, &constructor)
            .expect_err("recursive alias must error");

        assert!(matches!(err, Error::RecursiveAlias(_)));
    }

    #[test]
    fn duplicate_anchor_errors()
    {
        let mut scanner = Scanner::new(from_utf8("- &a 1\n- &a 2\n"));
        let mut parser = Parser::new();
        let mut composer = Composer::new();
        let resolver = CoreResolver;
        let constructor = CoreConstructor;

        let err = composer
            .next_document(&mut parser, &mut scanner, &resolver, &constructor)
            .expect_err("duplicate anchor must error");

        assert!(matches!(err, Error::DuplicateAnchor(_)));
    }

    #[test]
    fn duplicate_explicit_key_errors()
    {
        let mut scanner = Scanner::new(from_utf8("a: 1\na: 2\n"));
        let mut parser = Parser::new();
        let mut composer = Composer::new();
        let resolver = CoreResolver;
        let constructor = CoreConstructor;

        let err = composer
            .next_document(&mut parser, &mut scanner, &resolver, &constructor)
            .expect_err("duplicate key must error");

        assert!(matches!(err, Error::DuplicateKey(_)));
    }

    #[test]
    fn merge_key_fills_in_missing_keys_without_overriding()
    {
        let node = one("over: &base { x: 1, y: 2 }\nthis: { y: 9, <<: *base }\n");
        let pairs = node.as_mapping().expect("mapping");
        let this = &pairs.iter().find(|(k, _)| k.as_scalar() == Some("this")).unwrap().1;
        let this_pairs = this.as_mapping().expect("mapping");

        assert_eq!(this_pairs.len(), 2);
        assert_eq!(this_pairs[0].0.as_scalar(), Some("y"));
        assert_eq!(this_pairs[0].1.as_scalar(), Some("9"));
        assert_eq!(this_pairs[1].0.as_scalar(), Some("x"));
        assert_eq!(this_pairs[1].1.as_scalar(), Some("1"));
    }
}
