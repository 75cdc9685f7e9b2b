//! Tokens → datums.
//!
//! The reader keeps an explicit stack of open delimiters instead of
//! recursing, so arbitrarily deep nesting cannot overflow while reading.

use prob_ir::keywords;
use prob_ir::{Datum, DatumKind, Span, StringInterner};
use prob_lexer::{Token, TokenKind};

use crate::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FrameKind {
    List,
    Vector,
    /// `~` or `~@` waiting for the term it applies to; holds the form name.
    Prefix(&'static str),
}

struct Frame {
    kind: FrameKind,
    start: u32,
    items: Vec<Datum>,
}

/// Read every top-level datum of `source`.
pub fn read(source: &str, interner: &StringInterner) -> Result<Vec<Datum>, ParseError> {
    let tokens = prob_lexer::lex(source)?;
    Reader {
        interner,
        stack: Vec::new(),
        top: Vec::new(),
    }
    .run(tokens)
}

struct Reader<'a> {
    interner: &'a StringInterner,
    stack: Vec<Frame>,
    top: Vec<Datum>,
}

impl Reader<'_> {
    fn run(mut self, tokens: Vec<Token<'_>>) -> Result<Vec<Datum>, ParseError> {
        for token in tokens {
            let span = token.span;
            match token.kind {
                TokenKind::LParen => self.open(FrameKind::List, span),
                TokenKind::LBracket => self.open(FrameKind::Vector, span),
                TokenKind::Unquote => self.open(FrameKind::Prefix(keywords::UNQUOTE), span),
                TokenKind::Splice => self.open(FrameKind::Prefix(keywords::SPLICE), span),
                TokenKind::RParen => self.close(FrameKind::List, ')', span)?,
                TokenKind::RBracket => self.close(FrameKind::Vector, ']', span)?,
                atom => {
                    let datum = Datum::new(self.atom(atom), span);
                    self.deliver(datum);
                }
            }
        }

        match self.stack.pop() {
            None => Ok(self.top),
            Some(frame) => Err(Self::unfinished(&frame)),
        }
    }

    fn open(&mut self, kind: FrameKind, span: Span) {
        self.stack.push(Frame {
            kind,
            start: span.start,
            items: Vec::new(),
        });
    }

    fn close(&mut self, kind: FrameKind, close: char, span: Span) -> Result<(), ParseError> {
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::UnexpectedClose { close, span });
        };
        if let FrameKind::Prefix(_) = frame.kind {
            return Err(Self::unfinished(&frame));
        }
        if frame.kind != kind {
            return Err(ParseError::UnexpectedClose { close, span });
        }
        let span = Span::new(frame.start, span.end);
        let datum = match kind {
            FrameKind::Vector => DatumKind::Vector(frame.items),
            _ => DatumKind::List(frame.items),
        };
        self.deliver(Datum::new(datum, span));
        Ok(())
    }

    /// Hand a finished datum to the innermost open frame, first wrapping it
    /// in any pending `~`/`~@` prefixes.
    fn deliver(&mut self, mut datum: Datum) {
        loop {
            match self.stack.last_mut() {
                Some(frame) => {
                    if let FrameKind::Prefix(form) = frame.kind {
                        let start = frame.start;
                        self.stack.pop();
                        let head = Datum::new(
                            DatumKind::Symbol(self.interner.intern(form)),
                            Span::new(start, start),
                        );
                        let span = Span::new(start, datum.span.end);
                        datum = Datum::new(DatumKind::List(vec![head, datum]), span);
                        continue;
                    }
                    frame.items.push(datum);
                }
                None => self.top.push(datum),
            }
            return;
        }
    }

    fn atom(&self, kind: TokenKind<'_>) -> DatumKind {
        match kind {
            TokenKind::Int(n) => DatumKind::Int(n),
            TokenKind::Float(x) => DatumKind::Float(x.to_bits()),
            TokenKind::Str(s) => DatumKind::Str(self.interner.intern(&s)),
            TokenKind::Keyword(k) => DatumKind::Keyword(self.interner.intern(k)),
            TokenKind::Symbol("nil") => DatumKind::Nil,
            TokenKind::Symbol("true") => DatumKind::Bool(true),
            TokenKind::Symbol("false") => DatumKind::Bool(false),
            TokenKind::Symbol(s) => DatumKind::Symbol(self.interner.intern(s)),
            // Delimiters and prefixes are handled by `run`.
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Unquote
            | TokenKind::Splice => DatumKind::Nil,
        }
    }

    fn unfinished(frame: &Frame) -> ParseError {
        let at = Span::new(frame.start, frame.start + 1);
        match frame.kind {
            FrameKind::List => ParseError::UnclosedDelimiter { open: '(', span: at },
            FrameKind::Vector => ParseError::UnclosedDelimiter { open: '[', span: at },
            FrameKind::Prefix(form) => ParseError::DanglingPrefix {
                prefix: if form == keywords::SPLICE { "~@" } else { "~" },
                span: Span::new(frame.start, frame.start + 1),
            },
        }
    }
}

#[cfg(test)]
mod tests;
