//! Identity keys for top-level procedures.
//!
//! A key is the BLAKE3 hash of a canonical byte encoding of the compiled
//! body subtree. It depends on tags, field names, child order and leaf
//! values only, so recompiling the same text gives the same key.

use std::fmt;

use prob_stack::ensure_sufficient_stack;
use prob_trie::{Children, Node, Value};

// Bumped whenever the encoding changes.
const ENCODING_VERSION: u8 = 1;

const NODE_TAGGED: u8 = 0x01;
const NODE_UNTAGGED: u8 = 0x02;

const VALUE_NONE: u8 = 0x10;
const VALUE_NIL: u8 = 0x11;
const VALUE_BOOL: u8 = 0x12;
const VALUE_INT: u8 = 0x13;
const VALUE_FLOAT: u8 = 0x14;
const VALUE_STR: u8 = 0x15;
const VALUE_KEYWORD: u8 = 0x16;
const VALUE_SYMBOL: u8 = 0x17;

const CHILDREN_NONE: u8 = 0x20;
const CHILDREN_KEYED: u8 = 0x21;
const CHILDREN_SEQUENCE: u8 = 0x22;

/// 256-bit content hash of a compiled procedure body.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey([u8; 32]);

impl IdentityKey {
    /// Key of a subtree.
    pub fn of(node: &Node) -> Self {
        IdentityKey(*blake3::hash(&canonical_bytes(node)).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 12 hex digits.
    pub fn to_short(&self) -> String {
        blake3::Hash::from(self.0).to_hex()[..12].to_string()
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_short())
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_short())
    }
}

/// Deterministic encoding of a subtree, prefixed by the encoding version.
pub fn canonical_bytes(node: &Node) -> Vec<u8> {
    let mut buf = vec![ENCODING_VERSION];
    encode_node(node, &mut buf);
    buf
}

fn encode_node(node: &Node, buf: &mut Vec<u8>) {
    ensure_sufficient_stack(|| {
        match node.tag() {
            Some(tag) => {
                buf.push(NODE_TAGGED);
                encode_str(tag, buf);
            }
            None => buf.push(NODE_UNTAGGED),
        }
        match node.value() {
            Some(value) => encode_value(value, buf),
            None => buf.push(VALUE_NONE),
        }
        match node.children() {
            Children::None => buf.push(CHILDREN_NONE),
            Children::Keyed(fields) => {
                buf.push(CHILDREN_KEYED);
                encode_len(fields.len(), buf);
                for (key, child) in fields {
                    encode_str(key, buf);
                    encode_node(child, buf);
                }
            }
            Children::Sequence(items) => {
                buf.push(CHILDREN_SEQUENCE);
                encode_len(items.len(), buf);
                for child in items {
                    encode_node(child, buf);
                }
            }
        }
    });
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Nil => buf.push(VALUE_NIL),
        Value::Bool(b) => {
            buf.push(VALUE_BOOL);
            buf.push(u8::from(*b));
        }
        Value::Int(n) => {
            buf.push(VALUE_INT);
            buf.extend_from_slice(&n.to_le_bytes());
        }
        Value::Float(x) => {
            buf.push(VALUE_FLOAT);
            buf.extend_from_slice(&x.to_bits().to_le_bytes());
        }
        Value::Str(s) => {
            buf.push(VALUE_STR);
            encode_str(s, buf);
        }
        Value::Keyword(k) => {
            buf.push(VALUE_KEYWORD);
            encode_str(k, buf);
        }
        Value::Symbol(s) => {
            buf.push(VALUE_SYMBOL);
            encode_str(s, buf);
        }
    }
}

fn encode_str(s: &str, buf: &mut Vec<u8>) {
    encode_len(s.len(), buf);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_len(len: usize, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&(len as u64).to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use prob_trie::{MemoryTrie, TrieService};

    fn var(name: &str) -> Node {
        let trie = MemoryTrie;
        trie.make_keyed(
            "variable",
            vec![("name".to_string(), trie.make_leaf(Value::Symbol(name.into())))],
        )
    }

    #[test]
    fn equal_trees_have_equal_keys() {
        assert_eq!(IdentityKey::of(&var("x")), IdentityKey::of(&var("x")));
        assert_ne!(IdentityKey::of(&var("x")), IdentityKey::of(&var("y")));
    }

    #[test]
    fn value_kind_is_part_of_the_key() {
        let trie = MemoryTrie;
        let sym = trie.make_leaf(Value::Symbol("a".into()));
        let kw = trie.make_leaf(Value::Keyword("a".into()));
        assert_ne!(IdentityKey::of(&sym), IdentityKey::of(&kw));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let trie = MemoryTrie;
        let leaf = || trie.make_leaf(Value::Nil);
        let ab_c = trie.make_keyed("t", vec![("ab".into(), leaf()), ("c".into(), leaf())]);
        let a_bc = trie.make_keyed("t", vec![("a".into(), leaf()), ("bc".into(), leaf())]);
        assert_ne!(canonical_bytes(&ab_c), canonical_bytes(&a_bc));
    }

    #[test]
    fn display_is_short_hex() {
        let key = IdentityKey::of(&var("x"));
        let shown = key.to_string();
        assert_eq!(shown.len(), 13);
        assert!(shown.starts_with('#'));
        assert!(key.to_hex().starts_with(&shown[1..]));
        assert_eq!(key.to_hex().len(), 64);
    }

    #[test]
    fn hex_is_the_blake3_digest() {
        let node = var("x");
        let digest = blake3::hash(&canonical_bytes(&node));
        let key = IdentityKey::of(&node);
        assert_eq!(key.to_hex(), digest.to_hex().as_str());
        assert_eq!(key.to_short(), &digest.to_hex()[..12]);
        assert_eq!(key.as_bytes(), digest.as_bytes());
    }
}
