/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Turns a [`Reader`]'s code points into a stream of [`Token`]s.
//!
//! The [`Scanner`] is a pull cursor, same shape as [`Reader`] itself:
//! [`Scanner::front`] peeks the next token (fetching more input as
//! needed), [`Scanner::advance`] consumes it. Internally it buffers
//! tokens in a [`VecDeque`] rather than emitting them one at a time,
//! because a handful of tokens (`Key`, `BlockMappingStart`) can only be
//! known to belong in the stream *after* a later token (a `:`) has been
//! seen -- see the `simple key` machinery below.
//!
//! ## Simple keys
//!
//! A scalar, alias, anchor, tag or flow collection start is a candidate
//! simple key the moment it is scanned: it might turn out to be a
//! mapping key, if a `:` follows on the same line within 1024
//! characters. [`key::Key`] tracks one such candidate per flow-nesting
//! level. When a `:` confirms a candidate, its owning `Key` (and, in
//! block context, `BlockMappingStart`) token is spliced into the
//! already-buffered queue just before the candidate's own token,
//! using the arithmetic in [`Scanner::confirm_simple_key`]: a
//! candidate's `token_index` is the value of `fetched` (the running
//! count of every token ever placed in the queue, including spliced
//! ones) at the moment its own token was about to be pushed, so
//! `token_index - popped` is always that token's current offset into
//! `tokens`, no matter how many tokens have been spliced in ahead of it
//! since. [`Scanner::need_more_tokens`] blocks `front`/`advance` from
//! ever exposing a token whose candidate is still undecided, so a
//! splice is always inserted before anyone has observed the position
//! it lands at.

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod key;
pub(crate) mod scalar;

mod anchor;
mod directive;
mod tag;

use std::collections::VecDeque;

use self::{
    context::{Context, STARTING_INDENT},
    error::{ScanError, ScanErrorKind as E, ScanResult as Result},
    key::{Key, SimpleKeyCandidate},
};
use crate::{
    mark::Mark,
    reader::Reader,
    token::{DirectiveKind, Marker, ScalarStyle, Token, TokenEntry},
};

pub(crate) const fn is_blank(c: char) -> bool
{
    matches!(c, ' ' | '\t')
}

pub(crate) const fn is_break(c: char) -> bool
{
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

pub(crate) const fn is_white(c: char) -> bool
{
    is_blank(c) || is_break(c)
}

fn is_plain_start(c: char) -> bool
{
    !matches!(
        c,
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
    )
}

/// Consume and return characters from `r` while `f` holds, stopping at
/// the first non-matching character or end of stream.
pub(crate) fn take_while<R>(r: &mut R, f: impl Fn(char) -> bool) -> String
where
    R: Reader,
{
    let mut out = String::new();

    while let Some(c) = r.front()
    {
        if !f(c)
        {
            break;
        }

        out.push(c);
        r.advance();
    }

    out
}

/// Tokenizes a [`Reader`]'s code points, one pull at a time.
#[derive(Debug)]
pub(crate) struct Scanner<R>
{
    reader: R,

    tokens:  VecDeque<TokenEntry>,
    fetched: usize,
    popped:  usize,

    stream_start_produced: bool,
    stream_end_produced:   bool,

    simple_key_allowed: bool,
    key:                Key,
    context:            Context,
}

impl<R> Scanner<R>
where
    R: Reader,
{
    pub(crate) fn new(reader: R) -> Self
    {
        Self {
            reader,
            tokens: VecDeque::new(),
            fetched: 0,
            popped: 0,
            stream_start_produced: false,
            stream_end_produced: false,
            simple_key_allowed: true,
            key: Key::new(),
            context: Context::new(),
        }
    }

    /// Peek the next token without consuming it, fetching more input if
    /// necessary.
    pub(crate) fn front(&mut self) -> Result<&TokenEntry>
    {
        self.fetch_more_tokens()?;

        Ok(self.tokens.front().expect("fetch_more_tokens always leaves >= 1 token"))
    }

    /// Consume and return the next token.
    pub(crate) fn advance(&mut self) -> Result<TokenEntry>
    {
        self.fetch_more_tokens()?;

        let entry = self.tokens.pop_front().expect("fetch_more_tokens always leaves >= 1 token");
        self.popped += 1;

        Ok(entry)
    }

    /// True once `StreamEnd` has been produced and consumed.
    pub(crate) fn finished(&mut self) -> Result<bool>
    {
        Ok(self.stream_end_produced && self.tokens.is_empty())
    }

    /// Keep fetching tokens until at least one is ready to be exposed
    /// to the caller.
    fn fetch_more_tokens(&mut self) -> Result<()>
    {
        loop
        {
            if !self.need_more_tokens()
            {
                break;
            }

            self.fetch_next_token()?;
        }

        Ok(())
    }

    fn need_more_tokens(&self) -> bool
    {
        if self.tokens.is_empty()
        {
            return true;
        }

        if self.stream_end_produced
        {
            return false;
        }

        match self.key.candidate()
        {
            Some(candidate) => candidate.token_index == self.popped,
            None => false,
        }
    }

    fn push_token(&mut self, token: Token, start_mark: Mark, end_mark: Mark) -> usize
    {
        let index = self.fetched;

        self.tokens.push_back(TokenEntry::new(token, start_mark, end_mark));
        self.fetched += 1;

        index
    }

    fn insert_token(&mut self, offset: usize, token: Token, mark: Mark)
    {
        self.tokens.insert(offset, TokenEntry::new(token, mark, mark));
        self.fetched += 1;
    }

    /// Record the current position as a simple key candidate for the
    /// current flow level, if one isn't already pending and the
    /// grammar allows a key to start here. `required` iff we are in
    /// block context at the current indentation column -- a `:` must
    /// then confirm this exact candidate, rather than the candidate
    /// simply being allowed to expire unconfirmed.
    fn save_simple_key(&mut self)
    {
        if self.simple_key_allowed && self.key.candidate().is_none()
        {
            let required =
                self.context.is_block() && self.context.indent() == self.reader.column() as usize;

            self.key.save(SimpleKeyCandidate {
                mark: self.reader.mark(),
                token_index: self.fetched,
                required,
            });
        }
    }

    /// Drop the current level's candidate if it can no longer be
    /// confirmed: more than 1024 characters have been read since it was
    /// recorded, or the line has changed. A `required` candidate going
    /// stale either way is an error; any other candidate simply expires.
    fn stale_simple_keys(&mut self) -> Result<()>
    {
        if let Some(candidate) = self.key.candidate().copied()
        {
            let current = self.reader.mark();

            let stale = current.char_index().saturating_sub(candidate.mark.char_index()) > 1024
                || current.line() != candidate.mark.line();

            if stale
            {
                if candidate.required
                {
                    return Err(ScanError::new(E::KeyTooLong, current));
                }

                self.key.clear();
            }
        }

        Ok(())
    }

    /// Confirm the current level's simple key, if any, splicing its
    /// `Key` (and, in block context, `BlockMappingStart`) token into
    /// the queue just before the candidate's own token. Returns whether
    /// a candidate was confirmed.
    fn confirm_simple_key(&mut self) -> Result<bool>
    {
        let candidate = match self.key.take()
        {
            Some(candidate) => candidate,
            None => return Ok(false),
        };

        let offset = candidate.token_index - self.popped;
        let mark = candidate.mark;

        if self.context.is_block()
        {
            let column = mark.column() as usize;

            if self.context.add_indent(column, mark.line(), Marker::BlockMappingStart)
            {
                // Both land at `offset`: insert in reverse order so the
                // second insert (BlockMappingStart) ends up first.
                self.insert_token(offset, Token::Key, mark);
                self.insert_token(offset, Token::BlockMappingStart, mark);
            }
            else
            {
                self.insert_token(offset, Token::Key, mark);
            }
        }
        else
        {
            self.insert_token(offset, Token::Key, mark);
        }

        Ok(true)
    }

    /// Skip whitespace, line breaks and comments, resetting
    /// `simple_key_allowed` on every line break (a new line always
    /// permits a fresh key to start, in block context).
    fn skip_to_next_token(&mut self) -> Result<()>
    {
        loop
        {
            match self.reader.front()
            {
                Some(' ') =>
                {
                    self.reader.advance();
                },

                Some('\t') if self.context.is_block() && self.simple_key_allowed =>
                {
                    return Err(ScanError::new(E::InvalidTab, self.reader.mark()));
                },

                Some('\t') =>
                {
                    self.reader.advance();
                },

                Some(c) if is_break(c) =>
                {
                    self.reader.advance();

                    if self.context.is_block()
                    {
                        self.simple_key_allowed = true;
                    }
                },

                Some('#') =>
                {
                    take_while(&mut self.reader, |c| !is_break(c));
                },

                _ => break,
            }
        }

        Ok(())
    }

    /// Pop block indentation levels while the current column has
    /// dedented past them, emitting a `BlockEnd` for each.
    fn unroll_indent(&mut self, column: usize) -> Result<()>
    {
        let mark = self.reader.mark();

        let popped = self
            .context
            .unwind_indent(context::Indent::from(column), |_| Ok(()))
            .map_err(|kind| ScanError::new(kind, mark))?;

        for _ in 0..popped
        {
            self.push_token(Token::BlockEnd, mark, mark);
        }

        Ok(())
    }

    fn fetch_next_token(&mut self) -> Result<()>
    {
        if !self.stream_start_produced
        {
            self.stream_start_produced = true;

            let mark = self.reader.mark();
            self.push_token(Token::StreamStart(self.reader.encoding()), mark, mark);

            return Ok(());
        }

        self.stale_simple_keys()?;
        self.skip_to_next_token()?;
        self.unroll_indent(self.reader.column() as usize)?;

        if self.reader.empty()
        {
            return self.fetch_stream_end();
        }

        let c = self.reader.front().expect("checked not empty");
        let column = self.reader.column();

        match c
        {
            '%' if column == 0 => self.fetch_directive(),

            '-' if column == 0 && self.looks_like_document_marker("---") =>
            {
                self.fetch_document_marker(Token::DocumentStart)
            },

            '.' if column == 0 && self.looks_like_document_marker("...") =>
            {
                self.fetch_document_marker(Token::DocumentEnd)
            },

            '-' if self.is_indicator_followed_by_whitespace() => self.fetch_block_entry(),

            '[' => self.fetch_flow_collection_start(Token::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(Token::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(Token::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(Token::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),

            '?' if self.context.is_flow() || self.is_indicator_followed_by_whitespace() =>
            {
                self.fetch_key_indicator()
            },

            ':' if self.is_value_indicator() => self.fetch_value_indicator(),

            '&' => self.fetch_anchor_or_alias(true),
            '*' => self.fetch_anchor_or_alias(false),
            '!' => self.fetch_tag(),

            '|' => self.fetch_block_scalar(true),
            '>' => self.fetch_block_scalar(false),

            '\'' => self.fetch_flow_scalar(false),
            '"' => self.fetch_flow_scalar(true),

            _ if is_plain_start(c) => self.fetch_plain_scalar(),

            _ => Err(ScanError::new(E::UnknownDelimiter, self.reader.mark())),
        }
    }

    fn looks_like_document_marker(&mut self, marker: &str) -> bool
    {
        let snapshot = self.reader.save();

        let mut matched = true;

        for want in marker.chars()
        {
            if self.reader.front() != Some(want)
            {
                matched = false;
                break;
            }

            self.reader.advance();
        }

        let ok = matched
            && match self.reader.front()
            {
                None => true,
                Some(c) => is_white(c),
            };

        self.reader.restore(snapshot);

        ok
    }

    /// True if the character under the cursor is immediately followed
    /// by whitespace or end of stream -- the shape shared by `-`, `?`
    /// and (separately handled) `:` indicators.
    fn is_indicator_followed_by_whitespace(&mut self) -> bool
    {
        if self.context.is_flow()
        {
            return false;
        }

        let snapshot = self.reader.save();
        self.reader.advance();

        let ok = match self.reader.front()
        {
            None => true,
            Some(c) => is_white(c),
        };

        self.reader.restore(snapshot);

        ok
    }

    fn is_value_indicator(&mut self) -> bool
    {
        let snapshot = self.reader.save();
        self.reader.advance();

        let ok = match self.reader.front()
        {
            None => true,
            Some(c) if is_white(c) => true,
            Some(c) if self.context.is_flow() && matches!(c, ',' | ']' | '}') => true,
            _ => false,
        };

        self.reader.restore(snapshot);

        ok
    }

    fn fetch_document_marker(&mut self, token: Token) -> Result<()>
    {
        let start = self.reader.mark();

        for _ in 0..3
        {
            self.reader.advance();
        }

        let end = self.reader.mark();

        self.context.reset();
        self.key.reset();
        self.simple_key_allowed = true;

        self.push_token(token, start, end);

        Ok(())
    }

    fn fetch_directive(&mut self) -> Result<()>
    {
        let start = self.reader.mark();
        self.reader.advance();

        let (name, kind) = directive::scan_directive_name(&mut self.reader)?;

        let (value, handle_end_index) = match kind
        {
            DirectiveKind::Yaml => directive::scan_version_directive(&mut self.reader)?,
            DirectiveKind::Tag => directive::scan_tag_directive(&mut self.reader)?,
            DirectiveKind::Reserved =>
            {
                take_while(&mut self.reader, is_blank);
                (take_while(&mut self.reader, |c| !is_break(c)), 0)
            },
        };

        take_while(&mut self.reader, is_blank);

        if self.reader.front() == Some('#')
        {
            take_while(&mut self.reader, |c| !is_break(c));
        }

        match self.reader.front()
        {
            Some(c) if is_break(c) =>
            {
                self.reader.advance();
            },
            None => {},
            _ => return Err(ScanError::new(E::UnknownDirective, self.reader.mark())),
        }

        let end = self.reader.mark();

        self.simple_key_allowed = false;
        self.push_token(
            Token::Directive {
                name,
                value,
                handle_end_index,
                kind,
            },
            start,
            end,
        );

        Ok(())
    }

    fn fetch_block_entry(&mut self) -> Result<()>
    {
        let start = self.reader.mark();
        let column = self.reader.column() as usize;
        let line = self.reader.line();

        if self.context.add_indent(column, line, Marker::BlockSequenceStart)
        {
            self.push_token(Token::BlockSequenceStart, start, start);
        }

        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = true;
        self.push_token(Token::BlockEntry, start, end);

        Ok(())
    }

    fn fetch_key_indicator(&mut self) -> Result<()>
    {
        self.stale_simple_keys()?;

        if self.context.is_block()
        {
            let column = self.reader.column() as usize;
            let line = self.reader.line();

            if self.context.add_indent(column, line, Marker::BlockMappingStart)
            {
                let mark = self.reader.mark();
                self.push_token(Token::BlockMappingStart, mark, mark);
            }
        }

        self.key.clear();

        let start = self.reader.mark();
        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = self.context.is_block();
        self.push_token(Token::Key, start, end);

        Ok(())
    }

    fn fetch_value_indicator(&mut self) -> Result<()>
    {
        let confirmed = self.confirm_simple_key()?;

        if !confirmed && self.context.is_block()
        {
            let column = self.reader.column() as usize;
            let line = self.reader.line();

            if self.context.add_indent(column, line, Marker::BlockMappingStart)
            {
                let mark = self.reader.mark();
                self.push_token(Token::BlockMappingStart, mark, mark);
            }
        }

        let start = self.reader.mark();
        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = self.context.is_block();
        self.push_token(Token::Value, start, end);

        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, token: Token) -> Result<()>
    {
        self.save_simple_key();

        self.context.flow_increment().map_err(|kind| ScanError::new(kind, self.reader.mark()))?;
        self.key.push_level();

        let start = self.reader.mark();
        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = true;
        self.push_token(token, start, end);

        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, token: Token) -> Result<()>
    {
        self.key.pop_level();
        self.context.flow_decrement().map_err(|kind| ScanError::new(kind, self.reader.mark()))?;

        let start = self.reader.mark();
        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = false;
        self.push_token(token, start, end);

        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> Result<()>
    {
        self.key.clear();

        let start = self.reader.mark();
        self.reader.advance();
        let end = self.reader.mark();

        self.simple_key_allowed = true;
        self.push_token(Token::FlowEntry, start, end);

        Ok(())
    }

    fn fetch_anchor_or_alias(&mut self, is_anchor: bool) -> Result<()>
    {
        self.save_simple_key();
        self.simple_key_allowed = false;

        let start = self.reader.mark();
        let name = anchor::scan_anchor(&mut self.reader)?;
        let end = self.reader.mark();

        let token = if is_anchor { Token::Anchor(name) } else { Token::Alias(name) };
        self.push_token(token, start, end);

        Ok(())
    }

    fn fetch_tag(&mut self) -> Result<()>
    {
        self.save_simple_key();
        self.simple_key_allowed = false;

        let start = self.reader.mark();
        let (value, handle_end_index) = tag::scan_node_tag(&mut self.reader)?;
        let end = self.reader.mark();

        self.push_token(Token::Tag(value, handle_end_index), start, end);

        Ok(())
    }

    fn fetch_block_scalar(&mut self, literal: bool) -> Result<()>
    {
        self.simple_key_allowed = true;

        let start = self.reader.mark();
        let text = scalar::block::scan_block_scalar(&mut self.reader, literal, self.context.indent())?;
        let end = self.reader.mark();

        let style = if literal { ScalarStyle::Literal } else { ScalarStyle::Folded };
        self.push_token(Token::Scalar(text, style), start, end);

        Ok(())
    }

    fn fetch_flow_scalar(&mut self, double: bool) -> Result<()>
    {
        self.save_simple_key();
        self.simple_key_allowed = false;

        let start = self.reader.mark();
        let text = scalar::flow::scan_flow_scalar(&mut self.reader, double)?;
        let end = self.reader.mark();

        let style = if double { ScalarStyle::DoubleQuoted } else { ScalarStyle::SingleQuoted };
        self.push_token(Token::Scalar(text, style), start, end);

        Ok(())
    }

    fn fetch_plain_scalar(&mut self) -> Result<()>
    {
        self.save_simple_key();
        self.simple_key_allowed = false;

        let start = self.reader.mark();
        let text = scalar::plain::scan_plain_scalar(&mut self.reader, &self.context)?;
        let end = self.reader.mark();

        self.push_token(Token::Scalar(text, ScalarStyle::Plain), start, end);

        Ok(())
    }

    fn fetch_stream_end(&mut self) -> Result<()>
    {
        let mark = self.reader.mark();

        let popped = self
            .context
            .unwind_indent(STARTING_INDENT, |_| Ok(()))
            .map_err(|kind| ScanError::new(kind, mark))?;

        for _ in 0..popped
        {
            self.push_token(Token::BlockEnd, mark, mark);
        }

        self.key.reset();
        self.simple_key_allowed = false;
        self.stream_end_produced = true;

        self.push_token(Token::StreamEnd, mark, mark);

        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::from_utf8;

    fn tokens(yaml: &str) -> Vec<Token>
    {
        let mut scanner = Scanner::new(from_utf8(yaml));
        let mut out = Vec::new();

        loop
        {
            let entry = scanner.advance().expect("scan should not fail");
            let is_end = entry.token == Token::StreamEnd;
            out.push(entry.token);

            if is_end
            {
                break;
            }
        }

        out
    }

    #[test]
    fn empty_stream_is_just_start_and_end()
    {
        assert_eq!(tokens(""), vec![
            Token::StreamStart(crate::reader::Encoding::Utf8),
            Token::StreamEnd
        ]);
    }

    #[test]
    fn plain_scalar_document()
    {
        let t = tokens("hello world\n");

        assert_eq!(t[0], Token::StreamStart(crate::reader::Encoding::Utf8));
        assert_eq!(t[1], Token::Scalar("hello world".into(), ScalarStyle::Plain));
        assert_eq!(t[2], Token::StreamEnd);
    }

    #[test]
    fn simple_block_mapping()
    {
        let t = tokens("a: 1\nb: 2\n");

        assert_eq!(t, vec![
            Token::StreamStart(crate::reader::Encoding::Utf8),
            Token::BlockMappingStart,
            Token::Key,
            Token::Scalar("a".into(), ScalarStyle::Plain),
            Token::Value,
            Token::Scalar("1".into(), ScalarStyle::Plain),
            Token::Key,
            Token::Scalar("b".into(), ScalarStyle::Plain),
            Token::Value,
            Token::Scalar("2".into(), ScalarStyle::Plain),
            Token::BlockEnd,
            Token::StreamEnd,
        ]);
    }

    #[test]
    fn block_sequence()
    {
        let t = tokens("- 1\n- 2\n");

        assert_eq!(t, vec![
            Token::StreamStart(crate::reader::Encoding::Utf8),
            Token::BlockSequenceStart,
            Token::BlockEntry,
            Token::Scalar("1".into(), ScalarStyle::Plain),
            Token::BlockEntry,
            Token::Scalar("2".into(), ScalarStyle::Plain),
            Token::BlockEnd,
            Token::StreamEnd,
        ]);
    }

    #[test]
    fn flow_mapping()
    {
        let t = tokens("{a: 1, b: 2}\n");

        assert_eq!(t, vec![
            Token::StreamStart(crate::reader::Encoding::Utf8),
            Token::FlowMappingStart,
            Token::Key,
            Token::Scalar("a".into(), ScalarStyle::Plain),
            Token::Value,
            Token::Scalar("1".into(), ScalarStyle::Plain),
            Token::FlowEntry,
            Token::Key,
            Token::Scalar("b".into(), ScalarStyle::Plain),
            Token::Value,
            Token::Scalar("2".into(), ScalarStyle::Plain),
            Token::FlowMappingEnd,
            Token::StreamEnd,
        ]);
    }

    #[test]
    fn document_markers_reset_indentation()
    {
        let t = tokens("---\na: 1\n...\n");

        assert_eq!(t[0], Token::StreamStart(crate::reader::Encoding::Utf8));
        assert_eq!(t[1], Token::DocumentStart);
        assert!(t.contains(&Token::DocumentEnd));
    }

    #[test]
    fn anchor_and_alias_round_trip()
    {
        let t = tokens("a: &x 1\nb: *x\n");

        assert!(t.contains(&Token::Anchor("x".into())));
        assert!(t.contains(&Token::Alias("x".into())));
    }

    #[test]
    fn required_simple_key_left_unconfirmed_is_an_error()
    {
        let mut scanner = Scanner::new(from_utf8("a: 1\nb\n"));

        let err = loop
        {
            match scanner.advance()
            {
                Ok(entry) if entry.token == Token::StreamEnd =>
                {
                    panic!("expected a scan error before the stream ended")
                },
                Ok(_) => continue,
                Err(e) => break e,
            }
        };

        assert_eq!(err.kind, E::KeyTooLong);
    }

    #[test]
    fn unrequired_simple_key_expires_silently()
    {
        // `[a` opens a flow sequence, where a simple key is never
        // `required` -- letting the line change should simply drop the
        // candidate rather than error.
        let t = tokens("[a\n, b]\n");

        assert_eq!(t[0], Token::StreamStart(crate::reader::Encoding::Utf8));
        assert_eq!(t[1], Token::FlowSequenceStart);
    }
}
