//! Tokenizer for Prob surface text.
//!
//! The surface grammar is s-expression shaped: parentheses for forms,
//! brackets for tuple patterns, atoms for everything else. The lexer only
//! splits and classifies atoms; whether `define` is a keyword or `true` is a
//! boolean is decided by the reader.
//!
//! ```text
//! (define [a b] (tuple 1 2.5)) ; comment
//! ```
//!
//! Commas are whitespace. `;` starts a comment that runs to end of line.
//! `~` and `~@` are prefix tokens the reader expands to `unquote`/`splice`.

mod error;
mod scanner;
mod token;

pub use error::LexError;
pub use token::{Token, TokenKind};

/// Tokenize `source`, stopping at the first error.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    scanner::Scanner::new(source).collect()
}

#[cfg(test)]
mod tests;
