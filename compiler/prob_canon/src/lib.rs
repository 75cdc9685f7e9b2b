//! Desugaring and trace-tree compilation for the Prob front end.
//!
//! This crate takes recognized surface expressions (`prob_ir::Expr`) and
//! produces the two artifacts the inference engine consumes: the core
//! calculus (`prob_ir::Core`) and the addressable trace tree
//! (`prob_trie::Node`).
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Read → Recognize forms → **Canonicalize** → inference engine
//! ```
//!
//! # What Happens Here
//!
//! 1. **Destructuring** (`destructure`): tuple binding patterns become an
//!    aggregate binding under a synthesized name plus one projection per
//!    bound component.
//!
//! 2. **Desugaring** (`desugar`): blocks become nested `Let`/`LetRec`/`Seq`
//!    forms; consecutive function definitions share one `LetRec` group.
//!    A definition with nothing after it raises `W3001`.
//!
//! 3. **Trie compilation** (`lower`): one node per surface form, each checked
//!    with `TrieService::is_node` as it is emitted.
//!
//! 4. **Procedures** (`compile`): top-level function-valued forms get a
//!    BLAKE3 identity key over their compiled body and the scope handle of
//!    the compiling namespace.

mod compile;
mod desugar;
mod destructure;
mod env;
mod error;
mod identity;
mod lower;
mod options;
pub mod schema;
mod validate;

pub use compile::{CompiledForm, CompiledModule, Compiler, Procedure};
pub use desugar::{desugar, Desugarer};
pub use destructure::{destructure, synthesized_name};
pub use env::{Environment, Namespace, NamespaceScope, NamespaceTable, ScopeHandle};
pub use error::{CompileError, ErrorClass};
pub use identity::{canonical_bytes, IdentityKey};
pub use lower::TrieCompiler;
pub use options::CompileOptions;
pub use validate::{check_shape, validate, ShapeError};

use prob_ir::{Expr, StringInterner};
use prob_trie::{MemoryTrie, Node};

/// Compile one expression to its trace tree with the in-memory trie.
pub fn compile_expr(expr: &Expr, interner: &StringInterner) -> Result<Node, CompileError> {
    TrieCompiler::new(&MemoryTrie, interner).compile_expr(expr)
}
