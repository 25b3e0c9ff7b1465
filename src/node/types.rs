/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The public [`Node`] tree returned by a [`Composer`](super::Composer).

use std::rc::Rc;

use crate::{mark::Mark, token::ScalarStyle};

/// A single YAML node, cheaply `Clone`-able: cloning a [`Node`] clones an
/// [`Rc`], not the tree underneath. Two nodes produced from the same
/// anchor/alias pair are [`Rc::ptr_eq`] -- see [`Node::is_same_as`].
#[derive(Debug, Clone)]
pub struct Node(Rc<Repr>);

#[derive(Debug)]
struct Repr
{
    tag:   String,
    start: Mark,
    end:   Mark,
    value: Value,
}

/// The content carried by a [`Node`].
#[derive(Debug)]
pub enum Value
{
    Scalar(String, ScalarStyle),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

impl Node
{
    pub(crate) fn new(tag: String, start: Mark, end: Mark, value: Value) -> Self
    {
        Self(Rc::new(Repr { tag, start, end, value }))
    }

    /// This node's resolved tag URI, e.g. `tag:yaml.org,2002:str`.
    pub fn tag(&self) -> &str
    {
        &self.0.tag
    }

    pub fn start(&self) -> Mark
    {
        self.0.start
    }

    pub fn end(&self) -> Mark
    {
        self.0.end
    }

    pub fn value(&self) -> &Value
    {
        &self.0.value
    }

    /// Whether `self` and `other` are the *same* composed node -- true for
    /// every pair of an anchor's node and an alias resolved against it.
    pub fn is_same_as(&self, other: &Node) -> bool
    {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_scalar(&self) -> Option<&str>
    {
        match &self.0.value
        {
            Value::Scalar(data, _) => Some(data.as_str()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]>
    {
        match &self.0.value
        {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(Node, Node)]>
    {
        match &self.0.value
        {
            Value::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }
}

/// Structural equality used by duplicate-key detection: tag and content
/// must match, ignoring marks and scalar style. Two nodes sharing identity
/// ([`Node::is_same_as`]) are always structurally equal.
impl PartialEq for Node
{
    fn eq(&self, other: &Self) -> bool
    {
        if self.is_same_as(other)
        {
            return true;
        }

        self.0.tag == other.0.tag && self.0.value == other.0.value
    }
}

impl PartialEq for Value
{
    fn eq(&self, other: &Self) -> bool
    {
        match (self, other)
        {
            (Value::Scalar(a, _), Value::Scalar(b, _)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}
