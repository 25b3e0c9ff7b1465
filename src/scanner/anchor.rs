/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scans `&anchor` and `*alias` node properties.

use super::{is_white, take_while};
use crate::{
    reader::Reader,
    scanner::error::{ScanError, ScanErrorKind as E, ScanResult as Result},
};

/// Which of `&`/`*` started the property currently being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnchorKind
{
    Anchor,
    Alias,
}

impl AnchorKind
{
    pub fn of(c: char) -> Option<Self>
    {
        match c
        {
            '&' => Some(Self::Anchor),
            '*' => Some(Self::Alias),
            _ => None,
        }
    }
}

/// Scan an anchor or alias name, having already confirmed the leading
/// `&`/`*` via [`AnchorKind::of`].
pub(crate) fn scan_anchor<R>(r: &mut R) -> Result<String>
where
    R: Reader,
{
    r.advance();

    let name = take_while(r, |c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));

    if name.is_empty()
    {
        return Err(ScanError::new(E::InvalidAnchorName, r.mark()));
    }

    match r.front()
    {
        None => {},
        Some(c) if is_white(c) => {},
        Some(c) if matches!(c, '?' | ',' | ']' | '}' | '%' | '@' | '`') => {},
        Some(_) => return Err(ScanError::new(E::InvalidAnchorName, r.mark())),
    }

    Ok(name)
}
