/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scans `%YAML` / `%TAG` / reserved directives.

use atoi::atoi;

use super::{is_blank, is_white, take_while};
use crate::{
    reader::Reader,
    scanner::error::{ScanError, ScanErrorKind as E, ScanResult as Result},
    token::DirectiveKind,
};

/// Scan the name of a directive (`YAML`, `TAG`, or anything else, which
/// is treated as [`DirectiveKind::Reserved`] and skipped).
///
/// The leading `%` must already have been consumed.
pub(crate) fn scan_directive_name<R>(r: &mut R) -> Result<(String, DirectiveKind)>
where
    R: Reader,
{
    let name = take_while(r, |c| c.is_ascii_alphanumeric());

    let kind = match name.as_str()
    {
        "YAML" => DirectiveKind::Yaml,
        "TAG" => DirectiveKind::Tag,
        _ => DirectiveKind::Reserved,
    };

    Ok((name, kind))
}

/// Scan a `%YAML major.minor` directive's parameters, having already
/// consumed `%YAML`. Returns `(value, handle_end_index)` per
/// [`crate::token::Token::Directive`] -- `handle_end_index` here is the
/// byte offset of the `.` separator, unused by the Parser but kept for
/// symmetry with the TAG variant.
pub(crate) fn scan_version_directive<R>(r: &mut R) -> Result<(String, usize)>
where
    R: Reader,
{
    eat_separation_spaces(r)?;

    let major = scan_version_number(r, E::MissingMajor)?;

    expect(r, '.', E::InvalidVersion)?;

    let minor = scan_version_number(r, E::MissingMinor)?;

    let dot_index = major.len();
    let value = format!("{major}.{minor}");

    Ok((value, dot_index))
}

/// Scan a `%TAG handle prefix` directive's parameters, having already
/// consumed `%TAG`. Returns `(value, handle_end_index)` where
/// `value[..handle_end_index]` is the handle and
/// `value[handle_end_index..]` (after trimming leading blanks) is the
/// prefix.
pub(crate) fn scan_tag_directive<R>(r: &mut R) -> Result<(String, usize)>
where
    R: Reader,
{
    eat_separation_spaces(r)?;

    let handle = scan_tag_handle(r)?;

    eat_separation_spaces(r)?;

    let prefix = scan_tag_prefix(r)?;

    let handle_end_index = handle.len();
    let value = format!("{handle}{prefix}");

    Ok((value, handle_end_index))
}

/// `!`, `!!`, or `!alphanumeric!`.
pub(crate) fn scan_tag_handle<R>(r: &mut R) -> Result<String>
where
    R: Reader,
{
    expect(r, '!', E::InvalidTagHandle)?;

    let mut handle = String::from("!");

    let name = take_while(r, |c| c.is_ascii_alphanumeric() || c == '-');

    if !name.is_empty()
    {
        handle.push_str(&name);

        expect(r, '!', E::InvalidTagHandle)?;
        handle.push('!');
    }

    Ok(handle)
}

/// Everything up to the next whitespace/EOL is the prefix; `!<uri>` and
/// bare `tag:...` forms are both accepted verbatim, the node-tag level
/// escape decoding happens in [`super::tag`].
fn scan_tag_prefix<R>(r: &mut R) -> Result<String>
where
    R: Reader,
{
    let prefix = take_while(r, |c| !is_white(c));

    if prefix.is_empty()
    {
        return Err(ScanError::new(E::InvalidTagPrefix, r.mark()));
    }

    Ok(prefix)
}

fn scan_version_number<R>(r: &mut R, missing: E) -> Result<String>
where
    R: Reader,
{
    let digits = take_while(r, |c| c.is_ascii_digit());

    if digits.is_empty()
    {
        return Err(ScanError::new(missing, r.mark()));
    }

    let _: u32 = atoi(digits.as_bytes()).ok_or_else(|| ScanError::new(E::IntOverflow, r.mark()))?;

    Ok(digits)
}

fn eat_separation_spaces<R>(r: &mut R) -> Result<()>
where
    R: Reader,
{
    let found = take_while(r, is_blank);

    if found.is_empty()
    {
        return Err(ScanError::new(E::InvalidVersion, r.mark()));
    }

    Ok(())
}

fn expect<R>(r: &mut R, want: char, err: E) -> Result<()>
where
    R: Reader,
{
    match r.front()
    {
        Some(c) if c == want =>
        {
            r.advance();
            Ok(())
        },
        _ => Err(ScanError::new(err, r.mark())),
    }
}
