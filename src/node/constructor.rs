/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Turning a resolved `(tag, raw value, style)` into the string payload a
//! [`Node::Scalar`](super::types::Value::Scalar) stores.
//!
//! Parsing into a concrete Rust numeric/temporal type is out of scope:
//! the core schema tags (`int`, `float`, `bool`, `null`, `timestamp`)
//! keep their normalized *string* form. A [`Constructor`] is also where
//! merge-key recognition lives, since "is this tag the merge tag" is a
//! schema-specific question the Composer defers to its collaborator.

use crate::token::ScalarStyle;

pub(crate) const MERGE_TAG: &str = "tag:yaml.org,2002:merge";

/// Raw, as-scanned scalar content handed to a [`Constructor`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawValue<'a>
{
    pub data:  &'a str,
    pub style: ScalarStyle,
}

/// Normalizes a resolved tag + raw scalar into the string a `Node::Scalar`
/// stores, and recognizes schema-specific tags the Composer must treat
/// specially (currently just the merge key).
pub(crate) trait Constructor
{
    fn construct(&self, tag: &str, raw: RawValue<'_>) -> String;

    fn is_merge_key(&self, tag: &str) -> bool;
}

/// The YAML 1.1 core schema's constructor: canonicalizes `bool`/`null`
/// scalars to a single spelling, leaves `int`/`float`/`timestamp`/`str`
/// scalars as their original text (already a valid canonical form for
/// YAML's purposes), and recognizes `tag:yaml.org,2002:merge`.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CoreConstructor;

impl Constructor for CoreConstructor
{
    fn construct(&self, tag: &str, raw: RawValue<'_>) -> String
    {
        match tag
        {
            "tag:yaml.org,2002:bool" => match raw.data
            {
                "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" =>
                {
                    String::from("true")
                },
                _ => String::from("false"),
            },
            "tag:yaml.org,2002:null" => String::new(),
            _ => raw.data.to_string(),
        }
    }

    fn is_merge_key(&self, tag: &str) -> bool
    {
        tag == MERGE_TAG
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn normalizes_bool_spellings()
    {
        let c = CoreConstructor;
        let raw = RawValue { data: "Yes", style: ScalarStyle::Plain };

        assert_eq!(c.construct("tag:yaml.org,2002:bool", raw), "true");
    }

    #[test]
    fn leaves_int_text_untouched()
    {
        let c = CoreConstructor;
        let raw = RawValue { data: "042", style: ScalarStyle::Plain };

        assert_eq!(c.construct("tag:yaml.org,2002:int", raw), "042");
    }

    #[test]
    fn recognizes_merge_tag()
    {
        assert!(CoreConstructor.is_merge_key(MERGE_TAG));
        assert!(!CoreConstructor.is_merge_key("tag:yaml.org,2002:str"));
    }
}
