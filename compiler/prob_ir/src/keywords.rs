//! Reserved surface vocabulary.
//!
//! The form names below may not be used as identifiers. The self-reference
//! identifier and the wildcard are not keywords: they are accepted where an
//! identifier is expected and given their special meaning by the parser.

pub const PROGRAM: &str = "program";
pub const IF: &str = "if";
pub const BLOCK: &str = "block";
pub const DEFINE: &str = "define";
pub const WITH_ADDRESS: &str = "with-address";
pub const TUPLE: &str = "tuple";
pub const THIS: &str = "this";
pub const SPLICE: &str = "splice";
pub const UNQUOTE: &str = "unquote";

/// Every reserved form name.
pub const KEYWORDS: &[&str] = &[
    PROGRAM,
    IF,
    BLOCK,
    DEFINE,
    WITH_ADDRESS,
    TUPLE,
    THIS,
    SPLICE,
    UNQUOTE,
];

/// Identifier that refers to the enclosing procedure.
pub const SELF_REFERENCE: &str = "&this";

/// Pattern placeholder that is never bound.
pub const WILDCARD: &str = "_";

/// Joins component names of a synthesized tuple binding.
///
/// Identifiers containing this character are rejected so a synthesized
/// name can never collide with a user-written one.
pub const SEPARATOR: char = '|';

/// Check whether `ident` is a reserved form name.
pub fn is_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident)
}
