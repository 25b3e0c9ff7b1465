/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Tracks the current YAML context: flow nesting depth, and the block
//! indentation stack.
//!
//! Flow and block contexts are mutually exclusive at any given moment,
//! though flow collections may nest inside each other, and a block
//! collection may appear inside a flow collection's value position --
//! `flow` is just a depth counter, it does not forbid re-entering block
//! context once `flow` returns to zero.

use crate::{scanner::error::ScanErrorKind, token::Marker};

/// Local result alias: `Context` only ever fails with a bare
/// [`ScanErrorKind`] (it has no [`Mark`](crate::mark::Mark) of its own
/// to attach) -- callers in [`super`] pair it with the current reader
/// position to build a full [`super::error::ScanError`].
type Result<T> = std::result::Result<T, ScanErrorKind>;

/// Indent level recorded the very first time a document is entered,
/// before any block collection has been opened.
pub(crate) const STARTING_INDENT: Indent = Indent(None);

#[derive(Debug, Clone, Default)]
pub(crate) struct Context
{
    flow: usize,

    indent:  Indent,
    indents: Vec<IndentEntry>,
}

impl Context
{
    pub fn new() -> Self
    {
        Self {
            flow:    0,
            indent:  STARTING_INDENT,
            indents: Vec::new(),
        }
    }

    /// Reset to a fresh document's starting state.
    pub fn reset(&mut self)
    {
        self.flow = 0;
        self.indent = STARTING_INDENT;
        self.indents.clear();
    }

    pub fn flow(&self) -> usize
    {
        self.flow
    }

    pub fn is_flow(&self) -> bool
    {
        self.flow != 0
    }

    pub fn is_block(&self) -> bool
    {
        !self.is_flow()
    }

    pub fn flow_increment(&mut self) -> Result<usize>
    {
        self.flow = self.flow.checked_add(1).ok_or(ScanErrorKind::IntOverflow)?;

        Ok(self.flow)
    }

    pub fn flow_decrement(&mut self) -> Result<usize>
    {
        self.flow = self.flow.checked_sub(1).ok_or(ScanErrorKind::IntOverflow)?;

        Ok(self.flow)
    }

    pub fn indent(&self) -> Indent
    {
        self.indent
    }

    pub fn indents(&self) -> &[IndentEntry]
    {
        &self.indents
    }

    pub fn indents_mut(&mut self) -> &mut [IndentEntry]
    {
        &mut self.indents
    }

    /// Push the current indent and set it to `column` iff `column >
    /// current_indent`. Returns `true`
    /// iff the indent actually increased (i.e. a `BlockSequenceStart` /
    /// `BlockMappingStart` should be synthesized).
    pub fn add_indent(&mut self, column: usize, line: u64, kind: Marker) -> bool
    {
        if self.is_block() && self.indent < column
        {
            self.indents.push(IndentEntry {
                indent: self.indent,
                kind,
                line,
                zero_indented: false,
            });

            self.indent = Indent::from(column);

            true
        }
        else
        {
            false
        }
    }

    /// Pop one indent level, restoring the previous one, invoking `f`
    /// with the popped level's column first.
    pub fn pop_indent<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(usize) -> Result<()>,
    {
        if let Indent(Some(column)) = self.indent
        {
            f(column)?;
        }

        self.indent = self.indents.pop().map_or(STARTING_INDENT, |e| e.indent);

        Ok(())
    }

    /// Pop while `current_indent > column`, invoking `f` with each popped
    /// column.
    pub fn unwind_indent<F>(&mut self, column: Indent, mut f: F) -> Result<usize>
    where
        F: FnMut(usize) -> Result<()>,
    {
        let mut popped = 0;

        if self.is_block()
        {
            while self.indent > column
            {
                self.pop_indent(&mut f)?;
                popped += 1;
            }
        }

        Ok(popped)
    }
}

/// One level of the block indentation stack: the column indented *from*
/// (i.e. the parent's indent, restored on pop), what kind of collection
/// opened it, the line it was opened on, and whether it is a
/// zero-indented sequence (a `BlockSequenceStart` sharing its parent
/// mapping's column, e.g. `key:\n- a\n- b`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndentEntry
{
    indent:            Indent,
    pub kind:          Marker,
    pub line:          u64,
    pub zero_indented: bool,
}

impl IndentEntry
{
    pub fn indent(&self) -> Indent
    {
        self.indent
    }
}

/// A wrapper around `usize` that lets us express the "-1"th indent
/// without a signed type: `None` means no block collection has been
/// entered yet (the whole document could still turn out to be a bare
/// scalar).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Indent(Option<usize>);

impl Indent
{
    pub fn as_usize(self) -> Option<usize>
    {
        self.0
    }
}

impl From<usize> for Indent
{
    fn from(indent: usize) -> Self
    {
        Self(Some(indent))
    }
}

impl PartialEq<usize> for Indent
{
    fn eq(&self, other: &usize) -> bool
    {
        self.0 == Some(*other)
    }
}

impl PartialOrd<usize> for Indent
{
    fn partial_cmp(&self, other: &usize) -> Option<std::cmp::Ordering>
    {
        match self.0
        {
            Some(indent) => indent.partial_cmp(other),
            None => Some(std::cmp::Ordering::Less),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn starting_indent_is_below_zero()
    {
        let cxt = Context::new();

        assert!(cxt.indent() < 0usize);
    }

    #[test]
    fn add_indent_only_when_increasing()
    {
        let mut cxt = Context::new();

        assert!(cxt.add_indent(2, 0, Marker::BlockMappingStart));
        assert!(!cxt.add_indent(2, 0, Marker::BlockMappingStart));
        assert!(cxt.add_indent(4, 1, Marker::BlockSequenceStart));
        assert_eq!(cxt.indent(), Indent::from(4));
    }

    #[test]
    fn unwind_pops_until_column() -> Result<()>
    {
        let mut cxt = Context::new();
        cxt.add_indent(2, 0, Marker::BlockMappingStart);
        cxt.add_indent(4, 1, Marker::BlockMappingStart);

        let mut popped = Vec::new();
        cxt.unwind_indent(Indent::from(2), |col| {
            popped.push(col);
            Ok(())
        })?;

        assert_eq!(popped, vec![4]);
        assert_eq!(cxt.indent(), Indent::from(2));

        Ok(())
    }
}
