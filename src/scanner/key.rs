/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Tracks simple-key candidates, one per flow-nesting level.
//!
//! A simple key is tentatively recorded wherever it could legally
//! start; it is confirmed (and its `Key`/`BlockMappingStart` tokens
//! retroactively inserted) once a `:` is seen on the same line and
//! within 1024 characters. Index `0` is the block-context level; each
//! `[`/`{` pushes a new, initially empty, level.

use crate::mark::Mark;

/// A single candidate simple key, recorded at the position a token able
/// to start one (scalar, alias, anchor, tag, `[`, `{`) was emitted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimpleKeyCandidate
{
    pub mark:        Mark,
    /// Index into the token queue at which the `Key` token must be
    /// inserted if this candidate is confirmed.
    pub token_index: usize,
    /// `true` if a missing `:` for this candidate is an error rather
    /// than simply letting the candidate expire.
    pub required:    bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Key
{
    levels: Vec<Option<SimpleKeyCandidate>>,
}

impl Key
{
    pub fn new() -> Self
    {
        Self {
            levels: vec![None],
        }
    }

    pub fn reset(&mut self)
    {
        self.levels.clear();
        self.levels.push(None);
    }

    /// Enter a new flow-nesting level (on `[` / `{`).
    pub fn push_level(&mut self)
    {
        self.levels.push(None);
    }

    /// Leave the current flow-nesting level (on `]` / `}`), returning
    /// whatever candidate was live there.
    pub fn pop_level(&mut self) -> Option<SimpleKeyCandidate>
    {
        let candidate = self.levels.pop().flatten();

        if self.levels.is_empty()
        {
            self.levels.push(None);
        }

        candidate
    }

    pub fn level(&self) -> usize
    {
        self.levels.len() - 1
    }

    pub fn candidate(&self) -> Option<&SimpleKeyCandidate>
    {
        self.levels.last().and_then(|o| o.as_ref())
    }

    pub fn save(&mut self, candidate: SimpleKeyCandidate)
    {
        if let Some(slot) = self.levels.last_mut()
        {
            *slot = Some(candidate);
        }
    }

    /// Remove and return the candidate at the current level, if any.
    pub fn take(&mut self) -> Option<SimpleKeyCandidate>
    {
        self.levels.last_mut().and_then(|o| o.take())
    }

    /// Clear the candidate at the current level without returning it.
    pub fn clear(&mut self)
    {
        if let Some(slot) = self.levels.last_mut()
        {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn candidate() -> SimpleKeyCandidate
    {
        SimpleKeyCandidate {
            mark:         Mark::default(),
            token_index:  0,
            required:     false,
        }
    }

    #[test]
    fn levels_are_independent()
    {
        let mut key = Key::new();

        key.save(candidate());
        assert!(key.candidate().is_some());

        key.push_level();
        assert!(key.candidate().is_none());

        key.save(candidate());
        assert!(key.candidate().is_some());

        let popped = key.pop_level();
        assert!(popped.is_some());

        // Level 0's candidate is untouched by the nested level
        assert!(key.candidate().is_some());
    }
}
