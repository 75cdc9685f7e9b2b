#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn var(trie: &MemoryTrie, name: &str) -> Node {
    trie.make_keyed(
        "variable",
        vec![("name".to_string(), trie.make_leaf(Value::Symbol(name.to_string())))],
    )
}

fn sample(trie: &MemoryTrie) -> Node {
    let app = trie.make_sequence(
        "application",
        vec![var(trie, "flip"), trie.make_leaf(Value::Float(0.5))],
    );
    trie.make_keyed(
        "program",
        vec![
            ("pattern".to_string(), var(trie, "x")),
            ("body".to_string(), app),
        ],
    )
}

#[test]
fn constructed_nodes_are_well_formed() {
    let trie = MemoryTrie::new();
    let root = sample(&trie);
    let mut checked = 0;
    root.walk(|_, node| {
        assert!(trie.is_node(node), "malformed: {node:?}");
        checked += 1;
    });
    assert_eq!(checked, root.size());
    assert_eq!(checked, 7);
}

#[test]
fn get_follows_fields_and_indices() {
    let trie = MemoryTrie::new();
    let root = sample(&trie);
    let addr: Address = "body/0/name".parse().unwrap();
    assert_eq!(
        root.get(&addr).and_then(Node::value),
        Some(&Value::Symbol("flip".to_string()))
    );
    assert!(root.get(&"body/2".parse().unwrap()).is_none());
    assert!(root.get(&"pattern/0".parse().unwrap()).is_none());
    assert_eq!(root.get(&Address::root()), Some(&root));
}

#[test]
fn walk_is_preorder_in_field_order() {
    let trie = MemoryTrie::new();
    let root = sample(&trie);
    let mut addresses = Vec::new();
    root.walk(|addr, _| addresses.push(addr.to_string()));
    assert_eq!(
        addresses,
        vec![
            "/",
            "pattern",
            "pattern/name",
            "body",
            "body/0",
            "body/0/name",
            "body/1",
        ]
    );
}

#[test]
fn display_dump() {
    let trie = MemoryTrie::new();
    let root = sample(&trie);
    assert_eq!(
        root.to_string(),
        "program\n  pattern: variable\n    name: x\n  body: application\n    0: variable\n      name: flip\n    1: 0.5"
    );
}

#[test]
fn shallow_check_rejects_malformed_nodes() {
    let trie = MemoryTrie::new();
    let leaf = trie.make_leaf(Value::Int(1));

    let empty_tag = trie.make_sequence("", vec![]);
    assert!(!trie.is_node(&empty_tag));

    let duplicate = trie.make_keyed(
        "definition",
        vec![("x".to_string(), leaf.clone()), ("x".to_string(), leaf.clone())],
    );
    assert!(!trie.is_node(&duplicate));

    let unnamed = trie.make_keyed("literal", vec![(String::new(), leaf.clone())]);
    assert!(!trie.is_node(&unnamed));

    // Untagged nodes must be leaves.
    let bare = Node {
        tag: None,
        value: None,
        children: Children::Sequence(vec![leaf]),
    };
    assert!(!trie.is_node(&bare));
}

#[test]
fn tagged_node_without_children() {
    let trie = MemoryTrie::new();
    let this = trie.make_keyed("this", vec![]);
    assert!(trie.is_node(&this));
    assert!(this.children().is_empty());
    assert!(this.has_tag("this"));
    assert!(!this.is_leaf());
}

#[test]
fn float_values_compare_bitwise() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    assert_ne!(Value::Str("a".into()), Value::Symbol("a".into()));
}
