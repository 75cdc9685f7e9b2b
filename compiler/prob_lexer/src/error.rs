use prob_diagnostic::{Diagnostic, ErrorCode};
use prob_ir::Span;

/// Tokenization failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("invalid escape sequence `\\{escape}`")]
    InvalidEscape { escape: char, span: Span },

    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::InvalidNumber { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString { .. } => ErrorCode::E0001,
            LexError::InvalidEscape { .. } => ErrorCode::E0002,
            LexError::InvalidNumber { .. } => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            LexError::UnterminatedString { .. } => "string starts here",
            LexError::InvalidEscape { .. } => "unknown escape",
            LexError::InvalidNumber { .. } => "not a number",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), label);
        match self {
            LexError::InvalidEscape { .. } => {
                diag.with_note("valid escapes are \\n, \\t, \\r, \\0, \\\\ and \\\"")
            }
            _ => diag,
        }
    }
}
