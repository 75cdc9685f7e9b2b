//! Byte-level scanner.

use prob_ir::Span;

use crate::{LexError, Token, TokenKind};

/// Bytes that end an atom.
#[inline]
fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'\t' | b'\n' | b'\r' | b',' | b'(' | b')' | b'[' | b']' | b'"' | b';'
    )
}

/// Whether an atom should be read as a number.
fn looks_numeric(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes {
        [first, ..] if first.is_ascii_digit() => true,
        [b'+' | b'-', second, ..] => second.is_ascii_digit(),
        _ => false,
    }
}

pub(crate) struct Scanner<'src> {
    src: &'src str,
    pos: usize,
    done: bool,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Scanner {
            src,
            pos: 0,
            done: false,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }

    /// Skip whitespace, commas and `;` comments.
    fn skip_trivia(&mut self) {
        let bytes = self.src.as_bytes();
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b',') => self.pos += 1,
                Some(b';') => match memchr::memchr(b'\n', &bytes[self.pos..]) {
                    Some(offset) => self.pos += offset + 1,
                    None => self.pos = bytes.len(),
                },
                _ => return,
            }
        }
    }

    fn punct(&mut self, kind: TokenKind<'src>, width: usize) -> Token<'src> {
        let start = self.pos;
        self.pos += width;
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn string(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(offset) = memchr::memchr2(b'"', b'\\', &bytes[self.pos..]) else {
                self.pos = bytes.len();
                return Err(LexError::UnterminatedString {
                    span: self.span_from(start),
                });
            };
            value.push_str(&self.src[self.pos..self.pos + offset]);
            self.pos += offset;
            if bytes[self.pos] == b'"' {
                self.pos += 1;
                return Ok(Token {
                    kind: TokenKind::Str(value),
                    span: self.span_from(start),
                });
            }

            // Backslash: decode one escape.
            let escape_start = self.pos;
            self.pos += 1;
            let Some(escape) = self.src[self.pos..].chars().next() else {
                return Err(LexError::UnterminatedString {
                    span: self.span_from(start),
                });
            };
            self.pos += escape.len_utf8();
            let decoded = match escape {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                '\\' => '\\',
                '"' => '"',
                _ => {
                    return Err(LexError::InvalidEscape {
                        escape,
                        span: self.span_from(escape_start),
                    })
                }
            };
            value.push(decoded);
        }
    }

    fn atom(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_delimiter(b) {
                break;
            }
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        let span = self.span_from(start);

        let kind = if looks_numeric(text) {
            if let Ok(n) = text.parse::<i64>() {
                TokenKind::Int(n)
            } else if text.contains(['.', 'e', 'E']) {
                match text.parse::<f64>() {
                    Ok(x) => TokenKind::Float(x),
                    Err(_) => {
                        return Err(LexError::InvalidNumber {
                            text: text.to_owned(),
                            span,
                        })
                    }
                }
            } else {
                return Err(LexError::InvalidNumber {
                    text: text.to_owned(),
                    span,
                });
            }
        } else if let Some(keyword) = text.strip_prefix(':').filter(|k| !k.is_empty()) {
            TokenKind::Keyword(keyword)
        } else {
            TokenKind::Symbol(text)
        };
        Ok(Token { kind, span })
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.skip_trivia();
        let token = match self.peek()? {
            b'(' => Ok(self.punct(TokenKind::LParen, 1)),
            b')' => Ok(self.punct(TokenKind::RParen, 1)),
            b'[' => Ok(self.punct(TokenKind::LBracket, 1)),
            b']' => Ok(self.punct(TokenKind::RBracket, 1)),
            b'~' if self.src.as_bytes().get(self.pos + 1) == Some(&b'@') => {
                Ok(self.punct(TokenKind::Splice, 2))
            }
            b'~' => Ok(self.punct(TokenKind::Unquote, 1)),
            b'"' => self.string(),
            _ => self.atom(),
        };
        if token.is_err() {
            self.done = true;
        }
        Some(token)
    }
}
