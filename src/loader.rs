/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A single entry point wiring a [`Reader`] through the Scanner, Parser
//! and Composer stages, producing [`Node`] trees.

use crate::{
    error::{Error, Result},
    event::Parser,
    node::{Composer, CoreConstructor, CoreResolver, Node, NodeError},
    reader::{from_read, from_utf8, IoReader, Reader},
    scanner::Scanner,
};

/// Loads YAML documents out of a [`Reader`], using the core schema for
/// tag resolution and scalar construction.
pub struct Loader<R>
{
    tokens:      Scanner<R>,
    parser:      Parser,
    composer:    Composer,
    resolver:    CoreResolver,
    constructor: CoreConstructor,
}

impl<R> Loader<R>
where
    R: Reader,
{
    pub fn new(reader: R) -> Self
    {
        Self {
            tokens:      Scanner::new(reader),
            parser:      Parser::new(),
            composer:    Composer::new(),
            resolver:    CoreResolver,
            constructor: CoreConstructor,
        }
    }

    fn next(&mut self) -> Result<Option<Node>>
    {
        self.composer
            .next_document(&mut self.parser, &mut self.tokens, &self.resolver, &self.constructor)
            .map_err(Error::from)
    }

    /// Load every document, as an iterator yielding one `Result<Node>` per
    /// document. Stops (no further items) once the stream is exhausted, or
    /// once a document errors.
    pub fn load_all(&mut self) -> impl Iterator<Item = Result<Node>> + '_
    {
        let mut done = false;

        std::iter::from_fn(move || {
            if done
            {
                return None;
            }

            match self.next()
            {
                Ok(Some(node)) => Some(Ok(node)),
                Ok(None) =>
                {
                    done = true;
                    None
                },
                Err(e) =>
                {
                    done = true;
                    Some(Err(e))
                },
            }
        })
    }

    /// Load exactly one document. Errors if the stream is empty, or if it
    /// contains more than one document.
    pub fn load_single(&mut self) -> Result<Node>
    {
        let first = self.next()?.ok_or_else(|| Error::from(NodeError::NoDocument))?;

        if self.next()?.is_some()
        {
            return Err(Error::from(NodeError::MultipleDocuments(first.start())));
        }

        Ok(first)
    }
}

/// Load every document out of a UTF8 string, collecting eagerly so the
/// returned iterator does not borrow from this call's locals.
pub fn load_all(src: &str) -> impl Iterator<Item = Result<Node>>
{
    Loader::new(from_utf8(src)).load_all().collect::<Vec<_>>().into_iter()
}

/// Load exactly one document out of a UTF8 string.
pub fn load_single(src: &str) -> Result<Node>
{
    Loader::new(from_utf8(src)).load_single()
}

/// Load every document out of an IO byte stream.
pub fn load_all_from<S>(src: S) -> Result<impl Iterator<Item = Result<Node>>>
where
    S: std::io::Read,
{
    let reader: IoReader = from_read(src)?;

    Ok(Loader::new(reader).load_all().collect::<Vec<_>>().into_iter())
}

/// Load exactly one document out of an IO byte stream.
pub fn load_single_from<S>(src: S) -> Result<Node>
where
    S: std::io::Read,
{
    let reader: IoReader = from_read(src)?;

    Loader::new(reader).load_single()
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_single_returns_the_only_document()
    {
        let node = load_single("42\n").expect("valid document");

        assert_eq!(node.as_scalar(), Some("42"));
    }

    #[test]
    fn load_single_errors_on_extra_document()
    {
        let err = load_single("1\n---\n2\n").expect_err("two documents");

        assert_eq!(err.classify(), crate::error::Category::Semantic);
    }

    #[test]
    fn load_single_errors_on_empty_stream()
    {
        let err = load_single("").expect_err("no document");

        assert_eq!(err.classify(), crate::error::Category::Semantic);
    }

    #[test]
    fn load_all_collects_every_document()
    {
        let docs: Vec<_> =
            load_all("1\n---\n2\n---\n3\n").collect::<Result<Vec<_>>>().expect("valid documents");

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].as_scalar(), Some("1"));
        assert_eq!(docs[2].as_scalar(), Some("3"));
    }
}
