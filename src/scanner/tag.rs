/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scans a node's `!tag` property (as opposed to a `%TAG` directive,
//! see [`super::directive`]).

use super::{is_white, take_while};
use crate::{
    reader::Reader,
    scanner::error::{ScanError, ScanErrorKind as E, ScanResult as Result},
};

/// Scan a node tag, having already confirmed the leading `!`. Returns
/// `(value, handle_end_index)` per [`crate::token::Token::Tag`].
///
/// Three forms:
/// - `!<verbatim-uri>` -- handle is empty, `handle_end_index == 0`
/// - `!handle!suffix` / `!!suffix` / `!suffix` -- handle is `!`, `!!` or
///   `!name!`
/// - `!` alone -- the non-specific tag
pub(crate) fn scan_node_tag<R>(r: &mut R) -> Result<(String, usize)>
where
    R: Reader,
{
    r.advance(); // '!'

    if r.front() == Some('<')
    {
        r.advance();

        let uri = take_while(r, |c| c != '>' && !is_white(c));

        match r.front()
        {
            Some('>') => r.advance(),
            _ => return Err(ScanError::new(E::InvalidTagSuffix, r.mark())),
        };

        if uri.is_empty()
        {
            return Err(ScanError::new(E::InvalidTagSuffix, r.mark()));
        }

        return Ok((uri, 0));
    }

    let mut handle = String::from("!");

    // !handle!suffix -- a named handle is alphanumeric and terminated
    // by a second '!'. We scan speculatively: if what we took isn't
    // followed by '!', it wasn't a handle at all, it was the start of
    // the suffix and our overall handle is just the primary "!".
    let maybe_name = take_while(r, |c| c.is_ascii_alphanumeric() || c == '-');

    let handle_end_index = if r.front() == Some('!')
    {
        r.advance();
        handle.push_str(&maybe_name);
        handle.push('!');
        handle.len()
    }
    else
    {
        // Not a named handle -- everything we speculatively consumed
        // belongs to the suffix instead.
        let mut suffix = maybe_name;
        suffix.push_str(&take_while(r, |c| !is_white(c)));

        return Ok((format!("!{suffix}"), 1));
    };

    let suffix = take_while(r, |c| !is_white(c));

    if suffix.is_empty() && handle != "!"
    {
        return Err(ScanError::new(E::InvalidTagSuffix, r.mark()));
    }

    let mut value = handle;
    value.push_str(&suffix);

    Ok((value, handle_end_index))
}
