//! Parse error types.
//!
//! Reader failures (delimiters, prefixes, tokens) and form failures
//! (malformed expressions, arity, patterns, reserved identifiers) share one
//! error type. Every variant carries the rendered offending term or text so
//! the diagnostic can quote it.

use prob_diagnostic::{Diagnostic, ErrorCode};
use prob_ir::Span;
use prob_lexer::LexError;

/// Which class of failure a [`ParseError`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorClass {
    /// The term's shape does not match any form.
    Structural,
    /// A reserved identifier was used as a name.
    Naming,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unclosed `{open}`")]
    UnclosedDelimiter { open: char, span: Span },

    #[error("unexpected `{close}`")]
    UnexpectedClose { close: char, span: Span },

    #[error("`{prefix}` is not followed by a term")]
    DanglingPrefix { prefix: &'static str, span: Span },

    #[error("malformed expression `{term}`: {reason}")]
    MalformedExpr {
        term: String,
        reason: &'static str,
        span: Span,
    },

    #[error("`{form}` expects {expected}, found {found} in `{term}`")]
    Arity {
        form: &'static str,
        expected: &'static str,
        found: usize,
        term: String,
        span: Span,
    },

    #[error("malformed binding pattern `{term}`")]
    MalformedPattern { term: String, span: Span },

    #[error("reserved keyword `{name}` cannot be used as an identifier")]
    ReservedKeyword { name: String, span: Span },

    #[error("identifier `{name}` contains the reserved separator `|`")]
    ReservedSeparator { name: String, span: Span },

    #[error("the wildcard `_` cannot be used as a value")]
    WildcardReference { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnclosedDelimiter { span, .. }
            | ParseError::UnexpectedClose { span, .. }
            | ParseError::DanglingPrefix { span, .. }
            | ParseError::MalformedExpr { span, .. }
            | ParseError::Arity { span, .. }
            | ParseError::MalformedPattern { span, .. }
            | ParseError::ReservedKeyword { span, .. }
            | ParseError::ReservedSeparator { span, .. }
            | ParseError::WildcardReference { span } => *span,
        }
    }

    pub fn class(&self) -> ParseErrorClass {
        match self {
            ParseError::ReservedKeyword { .. }
            | ParseError::ReservedSeparator { .. }
            | ParseError::WildcardReference { .. } => ParseErrorClass::Naming,
            _ => ParseErrorClass::Structural,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.code(),
            ParseError::UnclosedDelimiter { .. } => ErrorCode::E0004,
            ParseError::UnexpectedClose { .. } => ErrorCode::E0005,
            ParseError::DanglingPrefix { .. } => ErrorCode::E0006,
            ParseError::MalformedExpr { .. } => ErrorCode::E1001,
            ParseError::Arity { .. } => ErrorCode::E1002,
            ParseError::MalformedPattern { .. } => ErrorCode::E1003,
            ParseError::ReservedKeyword { .. } => ErrorCode::E2001,
            ParseError::ReservedSeparator { .. } => ErrorCode::E2002,
            ParseError::WildcardReference { .. } => ErrorCode::E2004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        if let ParseError::Lex(err) = self {
            return err.to_diagnostic();
        }
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), self.code().description());
        match self {
            ParseError::MalformedPattern { .. } => {
                diag.with_note("a pattern is a name, `_`, or `[pattern ...]`")
            }
            ParseError::ReservedSeparator { .. } => {
                diag.with_note("`|` is reserved for names synthesized from tuple patterns")
            }
            ParseError::WildcardReference { .. } => {
                diag.with_note("`_` is only valid as a binding pattern and is never bound")
            }
            _ => diag,
        }
    }
}
