//! Error codes for all front-end diagnostics.
//!
//! Format: E#### / W#### where the first digit indicates the stage:
//! - E0xxx: Reader errors
//! - E1xxx: Structural (form) errors
//! - E2xxx: Naming errors
//! - W3xxx: Style warnings
//! - E9xxx: Internal compiler errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Reader Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid escape sequence
    E0002,
    /// Invalid number literal
    E0003,
    /// Unclosed delimiter
    E0004,
    /// Unexpected closing delimiter
    E0005,
    /// Reader prefix (`~`, `~@`) with nothing after it
    E0006,

    // Structural Errors (E1xxx)
    /// Malformed expression
    E1001,
    /// Wrong number of operands for a form
    E1002,
    /// Malformed binding pattern
    E1003,

    // Naming Errors (E2xxx)
    /// Reserved keyword used as an identifier
    E2001,
    /// Identifier contains the reserved separator
    E2002,
    /// Definition name collides with a definition field
    E2003,
    /// Wildcard used as a value
    E2004,

    // Style Warnings (W3xxx)
    /// Definition is the last statement of a block
    W3001,

    // Internal Errors (E9xxx)
    /// Emitted node rejected by the trie service
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::W3001 => "W3001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description used by `probc --explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid escape sequence in string literal",
            ErrorCode::E0003 => "invalid number literal",
            ErrorCode::E0004 => "unclosed delimiter",
            ErrorCode::E0005 => "unexpected closing delimiter",
            ErrorCode::E0006 => "reader prefix is not followed by a term",
            ErrorCode::E1001 => "expression does not match any form",
            ErrorCode::E1002 => "form has the wrong number of operands",
            ErrorCode::E1003 => "malformed binding pattern",
            ErrorCode::E2001 => "reserved keyword used as an identifier",
            ErrorCode::E2002 => "identifier contains the reserved separator `|`",
            ErrorCode::E2003 => "definition name collides with the `pattern` field",
            ErrorCode::E2004 => "wildcard `_` used as a value",
            ErrorCode::W3001 => "definition is the last statement of a block",
            ErrorCode::E9001 => "internal error: emitted node is not a valid trie node",
        }
    }

    pub fn is_reader_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001
                | ErrorCode::E0002
                | ErrorCode::E0003
                | ErrorCode::E0004
                | ErrorCode::E0005
                | ErrorCode::E0006
        )
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    pub fn is_naming_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003 | ErrorCode::E2004
        )
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[ErrorCode] = &[
            ErrorCode::E0001,
            ErrorCode::E0002,
            ErrorCode::E0003,
            ErrorCode::E0004,
            ErrorCode::E0005,
            ErrorCode::E0006,
            ErrorCode::E1001,
            ErrorCode::E1002,
            ErrorCode::E1003,
            ErrorCode::E2001,
            ErrorCode::E2002,
            ErrorCode::E2003,
            ErrorCode::E2004,
            ErrorCode::W3001,
            ErrorCode::E9001,
        ];
        let upper = s.to_ascii_uppercase();
        ALL.iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("unknown error code `{s}`"))
    }
}
