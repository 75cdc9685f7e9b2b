//! Node construction boundary.

use rustc_hash::FxHashSet;

use crate::{Children, Node, Value};

/// Narrow interface the compiler builds trees through.
///
/// Constructors never fail; well-formedness is checked separately with
/// [`TrieService::is_node`] so that a faulty producer can be reported with
/// the term it was compiling.
pub trait TrieService {
    /// Untagged leaf holding a terminal value.
    fn make_leaf(&self, value: Value) -> Node;

    /// Tagged node with named fields.
    fn make_keyed(&self, tag: &str, fields: Vec<(String, Node)>) -> Node;

    /// Tagged node with 0-indexed children.
    fn make_sequence(&self, tag: &str, children: Vec<Node>) -> Node;

    /// Shallow well-formedness check of one node.
    fn is_node(&self, node: &Node) -> bool;
}

/// In-memory trie service.
#[derive(Copy, Clone, Debug, Default)]
pub struct MemoryTrie;

impl MemoryTrie {
    pub fn new() -> Self {
        MemoryTrie
    }
}

impl TrieService for MemoryTrie {
    fn make_leaf(&self, value: Value) -> Node {
        Node {
            tag: None,
            value: Some(value),
            children: Children::None,
        }
    }

    fn make_keyed(&self, tag: &str, fields: Vec<(String, Node)>) -> Node {
        Node {
            tag: Some(tag.to_owned()),
            value: None,
            children: if fields.is_empty() {
                Children::None
            } else {
                Children::Keyed(fields)
            },
        }
    }

    fn make_sequence(&self, tag: &str, children: Vec<Node>) -> Node {
        Node {
            tag: Some(tag.to_owned()),
            value: None,
            children: Children::Sequence(children),
        }
    }

    /// A node is well formed when:
    /// - its tag, if any, is non-empty;
    /// - an untagged node is a leaf with a value and no children;
    /// - keyed fields have non-empty, distinct names.
    fn is_node(&self, node: &Node) -> bool {
        match &node.tag {
            Some(tag) if tag.is_empty() => return false,
            None if node.value.is_none() || !node.children.is_empty() => return false,
            _ => {}
        }
        match &node.children {
            Children::Keyed(fields) => {
                let mut seen = FxHashSet::default();
                fields
                    .iter()
                    .all(|(key, _)| !key.is_empty() && seen.insert(key.as_str()))
            }
            Children::None | Children::Sequence(_) => true,
        }
    }
}
