use std::fmt;

use prob_ir::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'src> {
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `~`
    Unquote,
    /// `~@`
    Splice,
    /// String literal with escapes already processed.
    Str(String),
    Int(i64),
    Float(f64),
    /// `:name`, without the colon.
    Keyword(&'src str),
    /// Any other atom, including `true`, `false` and `nil`.
    Symbol(&'src str),
}

impl TokenKind<'_> {
    /// Whether this token closes a list or vector.
    pub fn is_close(&self) -> bool {
        matches!(self, TokenKind::RParen | TokenKind::RBracket)
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Unquote => f.write_str("~"),
            TokenKind::Splice => f.write_str("~@"),
            TokenKind::Str(s) => write!(f, "{s:?}"),
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Float(x) => write!(f, "{x:?}"),
            TokenKind::Keyword(k) => write!(f, ":{k}"),
            TokenKind::Symbol(s) => f.write_str(s),
        }
    }
}
