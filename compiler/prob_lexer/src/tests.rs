#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use prob_ir::Span;

fn kinds(source: &str) -> Vec<TokenKind<'_>> {
    lex(source).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn punctuation_and_atoms() {
    assert_eq!(
        kinds("(define [a _] (tuple 1 2))"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("define"),
            TokenKind::LBracket,
            TokenKind::Symbol("a"),
            TokenKind::Symbol("_"),
            TokenKind::RBracket,
            TokenKind::LParen,
            TokenKind::Symbol("tuple"),
            TokenKind::Int(1),
            TokenKind::Int(2),
            TokenKind::RParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("42 -7 +3 2.5 1e3 -0.25"),
        vec![
            TokenKind::Int(42),
            TokenKind::Int(-7),
            TokenKind::Int(3),
            TokenKind::Float(2.5),
            TokenKind::Float(1000.0),
            TokenKind::Float(-0.25),
        ]
    );
}

#[test]
fn lone_sign_is_a_symbol() {
    assert_eq!(
        kinds("(- x 1)"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("-"),
            TokenKind::Symbol("x"),
            TokenKind::Int(1),
            TokenKind::RParen,
        ]
    );
}

#[test]
fn keywords_strip_the_colon() {
    assert_eq!(
        kinds(":flip :"),
        vec![TokenKind::Keyword("flip"), TokenKind::Symbol(":")]
    );
}

#[test]
fn strings_process_escapes() {
    assert_eq!(
        kinds(r#""a\tb\n\"q\"""#),
        vec![TokenKind::Str("a\tb\n\"q\"".to_string())]
    );
}

#[test]
fn comments_and_commas_are_trivia() {
    assert_eq!(
        kinds("; header\n(tuple 1, 2) ; trailing"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol("tuple"),
            TokenKind::Int(1),
            TokenKind::Int(2),
            TokenKind::RParen,
        ]
    );
}

#[test]
fn unquote_prefixes() {
    assert_eq!(
        kinds("~x ~@xs"),
        vec![
            TokenKind::Unquote,
            TokenKind::Symbol("x"),
            TokenKind::Splice,
            TokenKind::Symbol("xs"),
        ]
    );
}

#[test]
fn spans_cover_tokens() {
    let tokens = lex("(f \"hi\")").unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 1),
            Span::new(1, 2),
            Span::new(3, 7),
            Span::new(7, 8),
        ]
    );
}

#[test]
fn unterminated_string() {
    let err = lex("(f \"abc").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            span: Span::new(3, 7)
        }
    );
    assert_eq!(err.code(), prob_diagnostic::ErrorCode::E0001);
}

#[test]
fn invalid_escape() {
    let err = lex(r#""\q""#).unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidEscape {
            escape: 'q',
            span: Span::new(1, 3)
        }
    );
}

#[test]
fn invalid_number() {
    let err = lex("12abc").unwrap_err();
    assert!(matches!(err, LexError::InvalidNumber { ref text, .. } if text == "12abc"));
    assert!(err.to_diagnostic().is_error());
}

mod proptest_lexer {
    use super::super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_panics(source in "\\PC{0,64}") {
            let _ = lex(&source);
        }

        #[test]
        fn identifiers_lex_as_single_symbol(ident in "[a-z][a-z0-9?!*-]{0,12}") {
            let tokens = lex(&ident);
            prop_assert_eq!(tokens, Ok(vec![Token {
                kind: TokenKind::Symbol(&ident),
                span: prob_ir::Span::from_range(0..ident.len()),
            }]));
        }
    }
}
