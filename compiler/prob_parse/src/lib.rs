//! Reader and form recognition for Prob surface syntax.
//!
//! Two steps turn source text into the surface AST:
//!
//! 1. **Reading** ([`read`]): tokens become untyped [`Datum`] terms. The
//!    reader only knows about delimiters, literals and the `~`/`~@` prefixes.
//! 2. **Form recognition** ([`parse_expr`]): each datum is matched against the
//!    closed form vocabulary (`program`, `if`, `block`, `define`,
//!    `with-address`, `tuple`, `this`, `splice`, `unquote`). A non-empty list
//!    with any other head is an application.
//!
//! Identifiers are validated here: reserved form names and names containing
//! the synthesized-name separator are rejected.

mod error;
mod forms;
mod reader;

pub use error::{ParseError, ParseErrorClass};
pub use forms::{parse_expr, FormParser};
pub use reader::read;

use prob_ir::{Expr, StringInterner};

/// Read and recognize every top-level form of `source`.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<Vec<Expr>, ParseError> {
    let datums = read(source, interner)?;
    let parser = FormParser::new(interner);
    datums.iter().map(|datum| parser.parse_expr(datum)).collect()
}
