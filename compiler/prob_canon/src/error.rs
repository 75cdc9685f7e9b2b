//! Compile error types.

use prob_diagnostic::{Diagnostic, ErrorCode};
use prob_ir::Span;
use prob_parse::{ParseError, ParseErrorClass};

/// Error classes a compilation can abort with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The source does not have the shape of any form.
    Structural,
    /// An identifier is reserved or collides with a node field.
    Naming,
    /// The compiler produced output the node service rejects.
    Invariant,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("definition of `{name}` collides with the `pattern` field of its node")]
    FieldCollision { name: String, span: Span },

    #[error("compiled `{tag}` node for `{term}` is malformed")]
    InvalidNode {
        tag: String,
        term: String,
        output: String,
        span: Span,
    },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Parse(err) => err.span(),
            CompileError::FieldCollision { span, .. } | CompileError::InvalidNode { span, .. } => {
                *span
            }
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            CompileError::Parse(err) => match err.class() {
                ParseErrorClass::Structural => ErrorClass::Structural,
                ParseErrorClass::Naming => ErrorClass::Naming,
            },
            CompileError::FieldCollision { .. } => ErrorClass::Naming,
            CompileError::InvalidNode { .. } => ErrorClass::Invariant,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Parse(err) => err.code(),
            CompileError::FieldCollision { .. } => ErrorCode::E2003,
            CompileError::InvalidNode { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse(err) => err.to_diagnostic(),
            CompileError::FieldCollision { span, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(*span, "defined here")
                .with_note("rename the binding; `pattern` names the definition's pattern field"),
            CompileError::InvalidNode { output, span, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(*span, "while compiling this term")
                .with_note(format!("emitted:\n{output}"))
                .with_note("this is a compiler bug"),
        }
    }
}
