use pretty_assertions::assert_eq;
use yamlet::loader::{load_all, load_single};

#[test]
fn plain_integer_resolves_core_tag()
{
    let node = load_single("42").expect("valid document");

    assert_eq!(node.tag(), "tag:yaml.org,2002:int");
    assert_eq!(node.as_scalar(), Some("42"));
}

#[test]
fn mapping_preserves_insertion_order()
{
    let node = load_single("red: '#ff0000'\ngreen: '#00ff00'\n").expect("valid document");
    let pairs = node.as_mapping().expect("a mapping");

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0.as_scalar(), Some("red"));
    assert_eq!(pairs[0].1.as_scalar(), Some("#ff0000"));
    assert_eq!(pairs[1].0.as_scalar(), Some("green"));
    assert_eq!(pairs[1].1.as_scalar(), Some("#00ff00"));
}

#[test]
fn load_all_returns_every_document_in_a_stream()
{
    let docs: Vec<_> = load_all("---\nA\n...\n---\nB\n...\n")
        .collect::<Result<Vec<_>, _>>()
        .expect("valid stream");

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].as_scalar(), Some("A"));
    assert_eq!(docs[1].as_scalar(), Some("B"));
}

#[test]
fn merge_key_fills_missing_keys_without_overriding_explicit_ones()
{
    let node = load_single("base: &b { x: 1, y: 2 }\nover: { <<: *b, y: 9 }\n")
        .expect("valid document");
    let pairs = node.as_mapping().expect("a mapping");
    let over = &pairs.iter().find(|(k, _)| k.as_scalar() == Some("over")).unwrap().1;
    let over_pairs = over.as_mapping().expect("a mapping");

    assert_eq!(over_pairs.len(), 2);
    assert_eq!(over_pairs[0].0.as_scalar(), Some("y"));
    assert_eq!(over_pairs[0].1.as_scalar(), Some("9"));
    assert_eq!(over_pairs[1].0.as_scalar(), Some("x"));
    assert_eq!(over_pairs[1].1.as_scalar(), Some("1"));
}

#[test]
fn recursive_alias_is_an_error()
{
    let err = load_single("&a [ *a ]\n").expect_err("recursive alias");

    assert_eq!(err.classify(), yamlet::error::Category::Semantic);
}

#[test]
fn duplicate_explicit_key_is_an_error()
{
    let err = load_single("{a: 1, a: 2}\n").expect_err("duplicate key");

    assert_eq!(err.classify(), yamlet::error::Category::Semantic);
}

#[test]
fn anchor_and_alias_share_node_identity()
{
    let node = load_single("- &a {x: 1}\n- *a\n").expect("valid document");
    let items = node.as_sequence().expect("a sequence");

    assert!(items[0].is_same_as(&items[1]));
}

#[test]
fn load_single_rejects_a_stream_with_more_than_one_document()
{
    let err = load_single("A\n---\nB\n").expect_err("two documents");

    assert_eq!(err.classify(), yamlet::error::Category::Semantic);
}

#[test]
fn load_single_rejects_an_empty_stream()
{
    let err = load_single("").expect_err("no documents");

    assert_eq!(err.classify(), yamlet::error::Category::Semantic);
}
