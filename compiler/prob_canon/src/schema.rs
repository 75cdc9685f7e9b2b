//! Node types and field names of the trace tree.
//!
//! | tag            | children                                         |
//! |----------------|--------------------------------------------------|
//! | `program`      | `pattern`, `body`                                |
//! | `if`           | `predicate`, `then`, `else`                      |
//! | `block`        | sequence                                         |
//! | `with_address` | `tag`, `expression`                              |
//! | `definition`   | `pattern`, then `<bound name>` or `definiens`    |
//! | `application`  | sequence: operator, operands                     |
//! | `tuple`        | sequence                                         |
//! | `literal`      | `value`                                          |
//! | `variable`     | `name`                                           |
//! | `this`         | none                                             |
//! | `splice`       | `expression`                                     |
//! | `unquote`      | `expression`                                     |

pub mod tag {
    pub const PROGRAM: &str = "program";
    pub const IF: &str = "if";
    pub const BLOCK: &str = "block";
    pub const WITH_ADDRESS: &str = "with_address";
    pub const DEFINITION: &str = "definition";
    pub const APPLICATION: &str = "application";
    pub const TUPLE: &str = "tuple";
    pub const LITERAL: &str = "literal";
    pub const VARIABLE: &str = "variable";
    pub const THIS: &str = "this";
    pub const SPLICE: &str = "splice";
    pub const UNQUOTE: &str = "unquote";

    pub const ALL: &[&str] = &[
        PROGRAM,
        IF,
        BLOCK,
        WITH_ADDRESS,
        DEFINITION,
        APPLICATION,
        TUPLE,
        LITERAL,
        VARIABLE,
        THIS,
        SPLICE,
        UNQUOTE,
    ];
}

pub mod field {
    pub const PATTERN: &str = "pattern";
    pub const BODY: &str = "body";
    pub const PREDICATE: &str = "predicate";
    pub const THEN: &str = "then";
    pub const ELSE: &str = "else";
    pub const TAG: &str = "tag";
    pub const EXPRESSION: &str = "expression";
    pub const DEFINIENS: &str = "definiens";
    pub const VALUE: &str = "value";
    pub const NAME: &str = "name";
}

/// Fixed field names of a keyed node type, `None` for sequence types and
/// for `definition`, whose second field depends on its pattern.
pub fn fields_of(tag: &str) -> Option<&'static [&'static str]> {
    Some(match tag {
        tag::PROGRAM => &[field::PATTERN, field::BODY],
        tag::IF => &[field::PREDICATE, field::THEN, field::ELSE],
        tag::WITH_ADDRESS => &[field::TAG, field::EXPRESSION],
        tag::LITERAL => &[field::VALUE],
        tag::VARIABLE => &[field::NAME],
        tag::THIS => &[],
        tag::SPLICE | tag::UNQUOTE => &[field::EXPRESSION],
        _ => return None,
    })
}

/// Whether a node type holds its children as a sequence.
pub fn is_sequence(tag: &str) -> bool {
    matches!(tag, tag::BLOCK | tag::APPLICATION | tag::TUPLE)
}
