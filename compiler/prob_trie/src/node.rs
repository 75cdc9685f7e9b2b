//! Node representation.

use std::fmt;

use crate::{Address, Key};

/// Terminal value held by a leaf.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Keyword(String),
    /// An identifier, as stored under `variable/name`.
    Symbol(String),
}

/// Floats compare bitwise so that trees compiled from the same text are
/// equal, including NaN literals.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b))
            | (Value::Keyword(a), Value::Keyword(b))
            | (Value::Symbol(a), Value::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Keyword(k) => write!(f, ":{k}"),
            Value::Symbol(s) => f.write_str(s),
        }
    }
}

/// Children of a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Children {
    #[default]
    None,
    /// Named fields, in insertion order.
    Keyed(Vec<(String, Node)>),
    /// 0-indexed ordered children.
    Sequence(Vec<Node>),
}

impl Children {
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::Keyed(fields) => fields.len(),
            Children::Sequence(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One trace-tree node.
///
/// Built through [`TrieService`](crate::TrieService); fields are private so
/// a node can only be observed, never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) tag: Option<String>,
    pub(crate) value: Option<Value>,
    pub(crate) children: Children,
}

impl Node {
    /// Type tag, `None` for plain leaves.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.value.is_some()
    }

    /// Child under a field name.
    pub fn field(&self, name: &str) -> Option<&Node> {
        match &self.children {
            Children::Keyed(fields) => fields
                .iter()
                .find_map(|(key, node)| (key == name).then_some(node)),
            _ => None,
        }
    }

    /// Field names in insertion order; empty for sequence nodes.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        let fields: &[(String, Node)] = match &self.children {
            Children::Keyed(fields) => fields.as_slice(),
            _ => &[],
        };
        fields.iter().map(|(key, _)| key.as_str())
    }

    /// Child at a sequence position.
    pub fn index(&self, i: usize) -> Option<&Node> {
        match &self.children {
            Children::Sequence(items) => items.get(i),
            _ => None,
        }
    }

    pub fn child(&self, key: &Key) -> Option<&Node> {
        match key {
            Key::Field(name) => self.field(name),
            Key::Index(i) => self.index(*i),
        }
    }

    /// Node at `address`, relative to `self`.
    pub fn get(&self, address: &Address) -> Option<&Node> {
        address
            .keys()
            .iter()
            .try_fold(self, |node, key| node.child(key))
    }

    /// Visit every node in pre-order with its address.
    ///
    /// Uses an explicit stack; compiled programs can nest deeper than the
    /// native stack allows.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&Address, &'a Node)) {
        let mut stack = vec![(Address::root(), self)];
        while let Some((address, node)) = stack.pop() {
            visit(&address, node);
            match &node.children {
                Children::None => {}
                Children::Keyed(fields) => {
                    for (key, child) in fields.iter().rev() {
                        stack.push((address.child(key.as_str()), child));
                    }
                }
                Children::Sequence(items) => {
                    for (i, child) in items.iter().enumerate().rev() {
                        stack.push((address.child(i), child));
                    }
                }
            }
        }
    }

    /// Number of nodes in the subtree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }
}

/// Indented dump, one node per line:
///
/// ```text
/// program
///   pattern: variable
///     name: x
///   body: variable
///     name: x
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(usize, Option<String>, &Node)> = vec![(0, None, self)];
        let mut first = true;
        while let Some((depth, label, node)) = stack.pop() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{:width$}", "", width = depth * 2)?;
            if let Some(label) = label {
                write!(f, "{label}: ")?;
            }
            match (&node.tag, &node.value) {
                (Some(tag), Some(value)) => write!(f, "{tag} {value}")?,
                (Some(tag), None) => f.write_str(tag)?,
                (None, Some(value)) => write!(f, "{value}")?,
                (None, None) => f.write_str("?")?,
            }
            match &node.children {
                Children::None => {}
                Children::Keyed(fields) => {
                    for (key, child) in fields.iter().rev() {
                        stack.push((depth + 1, Some(key.clone()), child));
                    }
                }
                Children::Sequence(items) => {
                    for (i, child) in items.iter().enumerate().rev() {
                        stack.push((depth + 1, Some(i.to_string()), child));
                    }
                }
            }
        }
        Ok(())
    }
}
