//! Whole-tree shape validation.
//!
//! `TrieService::is_node` only looks at one node. This pass walks a
//! compiled tree and checks it against the node table in [`crate::schema`]:
//! - every tagged node carries a known type
//! - keyed types have exactly their fields, in table order
//! - `definition` has `pattern` plus one value field
//! - sequence types hold a sequence (an application is never empty)
//! - `literal/value` and `variable/name` are leaves
//!
//! Compilation runs it in debug builds only.

use std::fmt;

use prob_trie::{Address, Children, Node, Value};

use crate::schema::{self, field, tag};

/// First shape problem found in a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeError {
    pub address: Address,
    pub problem: String,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.address, self.problem)
    }
}

impl std::error::Error for ShapeError {}

/// Check a compiled tree against the node table.
pub fn check_shape(root: &Node) -> Result<(), ShapeError> {
    let mut first = None;
    root.walk(|address, node| {
        if first.is_some() {
            return;
        }
        if let Err(problem) = check_node(node) {
            first = Some(ShapeError {
                address: address.clone(),
                problem,
            });
        }
    });
    first.map_or(Ok(()), Err)
}

/// Debug-build assertion over [`check_shape`].
pub fn validate(root: &Node) {
    let shape = check_shape(root);
    debug_assert!(shape.is_ok(), "malformed trace tree: {shape:?}\n{root}");
}

fn check_node(node: &Node) -> Result<(), String> {
    let Some(node_tag) = node.tag() else {
        // Leaves are checked from their parent.
        return Ok(());
    };
    if !tag::ALL.contains(&node_tag) {
        return Err(format!("unknown node type `{node_tag}`"));
    }

    if schema::is_sequence(node_tag) {
        return match node.children() {
            Children::Sequence(items) if node_tag == tag::APPLICATION && items.is_empty() => {
                Err("application without an operator".to_string())
            }
            Children::Sequence(_) => Ok(()),
            _ => Err(format!("`{node_tag}` must hold a sequence")),
        };
    }

    let names: Vec<&str> = node.field_names().collect();
    if node_tag == tag::DEFINITION {
        return match names.as_slice() {
            [field::PATTERN, value_field] if *value_field != field::PATTERN => Ok(()),
            _ => Err(format!("definition fields {names:?}")),
        };
    }

    let expected = schema::fields_of(node_tag).unwrap_or(&[]);
    if names != expected {
        return Err(format!("`{node_tag}` fields {names:?}, expected {expected:?}"));
    }

    match node_tag {
        tag::LITERAL => leaf_at(node, field::VALUE, |_| true),
        tag::VARIABLE => leaf_at(node, field::NAME, |v| matches!(v, Value::Symbol(_))),
        _ => Ok(()),
    }
}

fn leaf_at(node: &Node, name: &str, accepts: impl Fn(&Value) -> bool) -> Result<(), String> {
    match node.field(name) {
        Some(child) if child.tag().is_none() && child.value().is_some_and(accepts) => Ok(()),
        _ => Err(format!("`{name}` must be a leaf")),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use prob_trie::{MemoryTrie, TrieService};

    #[test]
    fn accepts_well_formed_tree() {
        let trie = MemoryTrie;
        let name = trie.make_leaf(Value::Symbol("x".into()));
        let var = trie.make_keyed(tag::VARIABLE, vec![(field::NAME.into(), name)]);
        let program = trie.make_keyed(
            tag::PROGRAM,
            vec![(field::PATTERN.into(), var.clone()), (field::BODY.into(), var)],
        );
        assert_eq!(check_shape(&program), Ok(()));
    }

    #[test]
    fn reports_first_problem_with_address() {
        let trie = MemoryTrie;
        let bogus = trie.make_keyed("lambda", Vec::new());
        let app = trie.make_sequence(tag::APPLICATION, vec![bogus]);
        let block = trie.make_sequence(tag::BLOCK, vec![app]);
        let err = check_shape(&block).unwrap_err();
        assert_eq!(err.address.to_string(), "0/0");
        assert_eq!(err.to_string(), "at 0/0: unknown node type `lambda`");
    }

    #[test]
    fn rejects_empty_application_and_bad_variable() {
        let trie = MemoryTrie;
        let app = trie.make_sequence(tag::APPLICATION, Vec::new());
        assert!(check_shape(&app).is_err());

        let name = trie.make_leaf(Value::Int(3));
        let var = trie.make_keyed(tag::VARIABLE, vec![(field::NAME.into(), name)]);
        assert!(check_shape(&var).is_err());
    }
}
