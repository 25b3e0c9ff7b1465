/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The [`Graph`] arena a [`Composer`](super::Composer) builds one
//! document into, before materializing it into a public [`Node`] tree.
//!
//! Building into an arena (rather than directly into [`Node`]/[`Rc`])
//! lets an alias reference an in-progress node by index while its
//! mapping/sequence is still being filled in, and lets duplicate-key and
//! merge-key comparisons work on plain indices instead of forcing an
//! early, possibly-incomplete materialization.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::types::{Node, Value};
use crate::{mark::Mark, token::ScalarStyle};

slotmap::new_key_type! {
    /// Identifies a node under construction in a [`Graph`]. Never valid
    /// across two different `Graph` instances.
    pub(crate) struct NodeIndex;
}

pub(crate) struct Entry
{
    pub tag:   String,
    pub start: Mark,
    pub end:   Mark,
    pub data:  Data,
}

pub(crate) enum Data
{
    Scalar(String, ScalarStyle),
    Sequence(Vec<NodeIndex>),
    Mapping(Vec<(NodeIndex, NodeIndex)>),
}

#[derive(Default)]
pub(crate) struct Graph
{
    store: SlotMap<NodeIndex, Entry>,
}

impl Graph
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Drop every node, ready for the next document.
    pub fn clear(&mut self)
    {
        self.store.clear();
    }

    pub fn insert_scalar(
        &mut self,
        tag: String,
        start: Mark,
        end: Mark,
        data: String,
        style: ScalarStyle,
    ) -> NodeIndex
    {
        self.store.insert(Entry { tag, start, end, data: Data::Scalar(data, style) })
    }

    pub fn insert_sequence(&mut self, tag: String, start: Mark, end: Mark) -> NodeIndex
    {
        self.store.insert(Entry { tag, start, end, data: Data::Sequence(Vec::new()) })
    }

    pub fn insert_mapping(&mut self, tag: String, start: Mark, end: Mark) -> NodeIndex
    {
        self.store.insert(Entry { tag, start, end, data: Data::Mapping(Vec::new()) })
    }

    pub fn push_sequence_entry(&mut self, seq: NodeIndex, entry: NodeIndex)
    {
        match &mut self.store[seq].data
        {
            Data::Sequence(items) => items.push(entry),
            _ => unreachable!("push_sequence_entry called on a non-sequence node"),
        }
    }

    /// Replace a mapping's whole pair-list at once, e.g. after a merge-key
    /// pass has built the final ordered set of pairs.
    pub fn set_mapping_pairs(&mut self, map: NodeIndex, pairs: Vec<(NodeIndex, NodeIndex)>)
    {
        match &mut self.store[map].data
        {
            Data::Mapping(existing) => *existing = pairs,
            _ => unreachable!("set_mapping_pairs called on a non-mapping node"),
        }
    }

    pub fn tag(&self, idx: NodeIndex) -> &str
    {
        &self.store[idx].tag
    }

    /// Like [`Self::mapping_pairs`], but `None` rather than a panic when
    /// `idx` is not a mapping -- used when checking a merge value's shape.
    pub fn try_mapping_pairs(&self, idx: NodeIndex) -> Option<&[(NodeIndex, NodeIndex)]>
    {
        match &self.store[idx].data
        {
            Data::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Like [`Self::sequence_entries`], but `None` rather than a panic when
    /// `idx` is not a sequence -- used when checking a merge value's shape.
    pub fn try_sequence_entries(&self, idx: NodeIndex) -> Option<&[NodeIndex]>
    {
        match &self.store[idx].data
        {
            Data::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Structural equality of two arena nodes -- same shape as
    /// [`Node`](super::types::Node)'s `PartialEq`, used for duplicate-key
    /// detection before anything is materialized.
    pub fn nodes_equal(&self, a: NodeIndex, b: NodeIndex) -> bool
    {
        if a == b
        {
            return true;
        }

        let (ea, eb) = (&self.store[a], &self.store[b]);

        if ea.tag != eb.tag
        {
            return false;
        }

        match (&ea.data, &eb.data)
        {
            (Data::Scalar(x, _), Data::Scalar(y, _)) => x == y,
            (Data::Sequence(x), Data::Sequence(y)) =>
            {
                x.len() == y.len() && x.iter().zip(y).all(|(&x, &y)| self.nodes_equal(x, y))
            },
            (Data::Mapping(x), Data::Mapping(y)) =>
            {
                x.len() == y.len()
                    && x.iter().zip(y).all(|(&(xk, xv), &(yk, yv))| {
                        self.nodes_equal(xk, yk) && self.nodes_equal(xv, yv)
                    })
            },
            _ => false,
        }
    }

    /// Walk the arena from `root`, producing the public, `Rc`-backed
    /// [`Node`] tree. Nodes reachable from more than one place (aliases)
    /// are materialized once and `Rc::clone`d thereafter, preserving
    /// pointer identity.
    pub fn materialize(&self, root: NodeIndex) -> Node
    {
        let mut memo = HashMap::new();
        self.materialize_rec(root, &mut memo)
    }

    fn materialize_rec(&self, idx: NodeIndex, memo: &mut HashMap<NodeIndex, Node>) -> Node
    {
        if let Some(node) = memo.get(&idx)
        {
            return node.clone();
        }

        let entry = &self.store[idx];

        let value = match &entry.data
        {
            Data::Scalar(data, style) => Value::Scalar(data.clone(), *style),
            Data::Sequence(items) =>
            {
                Value::Sequence(items.iter().map(|&i| self.materialize_rec(i, memo)).collect())
            },
            Data::Mapping(pairs) => Value::Mapping(
                pairs
                    .iter()
                    .map(|&(k, v)| (self.materialize_rec(k, memo), self.materialize_rec(v, memo)))
                    .collect(),
            ),
        };

        let node = Node::new(entry.tag.clone(), entry.start, entry.end, value);
        memo.insert(idx, node.clone());

        node
    }
}
