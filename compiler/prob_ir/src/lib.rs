//! Prob IR - shared syntax types for the front end.
//!
//! This crate contains the data structures every front-end stage agrees on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - `Datum`, the reader's output (untyped s-expression terms)
//! - The surface AST (`Expr`, `Pattern`, `Literal`) produced by form parsing
//! - The core calculus (`Core`) produced by desugaring
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string constants are `Name(u32)`
//! - **Closed Vocabulary**: surface forms are a fixed enum; anything with an
//!   unrecognized head is an application
//! - **No Residual Patterns**: `Core` binds atomic names only

pub mod ast;
pub mod core;
mod datum;
mod interner;
pub mod keywords;
mod name;
mod span;

pub use ast::{Expr, ExprKind, Literal, Pattern};
pub use self::core::Core;
pub use datum::{Datum, DatumKind};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
