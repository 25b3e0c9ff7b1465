/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Tag resolution: turning `(node kind, explicit tag, scalar value,
//! implicit flag)` into a concrete tag, for nodes the document left
//! untagged.

/// The kind of node a [`Resolver`] is being asked to resolve a tag for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind
{
    Scalar,
    Sequence,
    Mapping,
}

/// Maps an untagged (or `!`-tagged) node to a concrete tag.
pub(crate) trait Resolver
{
    /// `explicit` is the tag attached in the document, if any (already
    /// excluding the non-resolvable `!`). `value` is the scalar's text,
    /// when `kind` is [`NodeKind::Scalar`]. `implicit` is whether the
    /// node had no explicit tag at all (as opposed to a quoted/non-plain
    /// scalar, which is never implicitly resolved past `str`).
    fn resolve(&self, kind: NodeKind, explicit: Option<&str>, value: Option<&str>, implicit: bool)
        -> String;
}

/// The YAML 1.1 core schema: resolves plain scalars to `bool`, `int`,
/// `float`, `null`, `timestamp`, or `merge` by pattern, in the order
/// PyYAML's core-schema resolver tries them, falling back to `str`;
/// collections fall back to `seq`/`map`.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CoreResolver;

const TAG_PREFIX: &str = "tag:yaml.org,2002:";

impl Resolver for CoreResolver
{
    fn resolve(
        &self,
        kind: NodeKind,
        explicit: Option<&str>,
        value: Option<&str>,
        implicit: bool,
    ) -> String
    {
        if let Some(tag) = explicit
        {
            return tag.to_string();
        }

        match kind
        {
            NodeKind::Sequence => format!("{TAG_PREFIX}seq"),
            NodeKind::Mapping => format!("{TAG_PREFIX}map"),
            NodeKind::Scalar if implicit =>
            {
                let value = value.unwrap_or_default();
                let core = resolve_core_scalar(value).unwrap_or("str");

                format!("{TAG_PREFIX}{core}")
            },
            NodeKind::Scalar => format!("{TAG_PREFIX}str"),
        }
    }
}

/// Returns the core-schema type name (without the `tag:yaml.org,2002:`
/// prefix) a plain scalar's text implicitly resolves to, or `None` for
/// `str`.
fn resolve_core_scalar(value: &str) -> Option<&'static str>
{
    if value == "<<"
    {
        return Some("merge");
    }

    if is_null(value)
    {
        return Some("null");
    }

    if is_bool(value)
    {
        return Some("bool");
    }

    if is_int(value)
    {
        return Some("int");
    }

    if is_float(value)
    {
        return Some("float");
    }

    if is_timestamp(value)
    {
        return Some("timestamp");
    }

    None
}

fn is_null(v: &str) -> bool
{
    matches!(v, "~" | "null" | "Null" | "NULL" | "")
}

fn is_bool(v: &str) -> bool
{
    matches!(
        v,
        "yes" | "Yes"
            | "YES"
            | "no"
            | "No"
            | "NO"
            | "true"
            | "True"
            | "TRUE"
            | "false"
            | "False"
            | "FALSE"
            | "on"
            | "On"
            | "ON"
            | "off"
            | "Off"
            | "OFF"
    )
}

fn is_int(v: &str) -> bool
{
    let v = v.strip_prefix(['-', '+']).unwrap_or(v);

    if v.is_empty()
    {
        return false;
    }

    if let Some(hex) = v.strip_prefix("0x")
    {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    if let Some(oct) = v.strip_prefix("0o")
    {
        return !oct.is_empty() && oct.chars().all(|c| ('0'..='7').contains(&c));
    }

    if v.contains(':')
    {
        // sexagesimal, e.g. 190:20:30
        return v.split(':').all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    }

    v.chars().all(|c| c.is_ascii_digit())
}

fn is_float(v: &str) -> bool
{
    let stripped = v.strip_prefix(['-', '+']).unwrap_or(v);

    if matches!(stripped, ".inf" | ".Inf" | ".INF")
    {
        return true;
    }

    if matches!(v, ".nan" | ".NaN" | ".NAN")
    {
        return true;
    }

    if !stripped.contains('.') || stripped.contains(':')
    {
        return false;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;

    for c in stripped.chars()
    {
        match c
        {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            'e' | 'E' | '+' | '-' =>
            {},
            _ => return false,
        }
    }

    seen_digit
}

fn is_timestamp(v: &str) -> bool
{
    let digits_only = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    // `YYYY-MM-DD`, optionally followed by a time component -- a full ISO
    // 8601 / timestamp grammar is out of scope; this recognizes the shape.
    let mut parts = v.splitn(2, |c| c == 'T' || c == ' ' || c == 't');
    let date = match parts.next()
    {
        Some(d) => d,
        None => return false,
    };

    let date_fields: Vec<&str> = date.split('-').collect();

    date_fields.len() == 3
        && date_fields[0].len() == 4
        && digits_only(date_fields[0])
        && digits_only(date_fields[1])
        && digits_only(date_fields[2])
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn resolves_core_scalars()
    {
        let r = CoreResolver;

        assert_eq!(
            r.resolve(NodeKind::Scalar, None, Some("42"), true),
            "tag:yaml.org,2002:int"
        );
        assert_eq!(
            r.resolve(NodeKind::Scalar, None, Some("3.14"), true),
            "tag:yaml.org,2002:float"
        );
        assert_eq!(
            r.resolve(NodeKind::Scalar, None, Some("true"), true),
            "tag:yaml.org,2002:bool"
        );
        assert_eq!(r.resolve(NodeKind::Scalar, None, Some("~"), true), "tag:yaml.org,2002:null");
        assert_eq!(
            r.resolve(NodeKind::Scalar, None, Some("hello"), true),
            "tag:yaml.org,2002:str"
        );
    }

    #[test]
    fn non_implicit_scalar_is_always_str()
    {
        let r = CoreResolver;

        assert_eq!(
            r.resolve(NodeKind::Scalar, None, Some("42"), false),
            "tag:yaml.org,2002:str"
        );
    }

    #[test]
    fn explicit_tag_wins()
    {
        let r = CoreResolver;

        assert_eq!(
            r.resolve(NodeKind::Scalar, Some("tag:example.com,2000:custom"), Some("42"), true),
            "tag:example.com,2000:custom"
        );
    }

    #[test]
    fn collections_fall_back_to_seq_map()
    {
        let r = CoreResolver;

        assert_eq!(r.resolve(NodeKind::Sequence, None, None, true), "tag:yaml.org,2002:seq");
        assert_eq!(r.resolve(NodeKind::Mapping, None, None, true), "tag:yaml.org,2002:map");
    }
}
