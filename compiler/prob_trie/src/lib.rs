//! Trace-tree nodes.
//!
//! A trace tree is a uniform, addressable tree: every node has an optional
//! type tag, an optional terminal value, and either keyed children (fields)
//! or an ordered, 0-indexed sequence of children. The inference engine
//! addresses nodes by path from the root, so a node's address is the only
//! identity it has across repeated executions.
//!
//! The compiler consumes this crate through [`TrieService`]; [`MemoryTrie`]
//! is the in-process implementation.

mod address;
mod node;
mod service;

pub use address::{Address, Key};
pub use node::{Children, Node, Value};
pub use service::{MemoryTrie, TrieService};

#[cfg(test)]
mod tests;
