#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn read_one(source: &str, interner: &StringInterner) -> Datum {
    let mut datums = read(source, interner).unwrap();
    assert_eq!(datums.len(), 1, "expected one datum in {source:?}");
    datums.remove(0)
}

#[test]
fn literals() {
    let interner = StringInterner::new();
    let datums = read("nil true false 3 2.5 \"s\" :k", &interner).unwrap();
    let kinds: Vec<DatumKind> = datums.into_iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DatumKind::Nil,
            DatumKind::Bool(true),
            DatumKind::Bool(false),
            DatumKind::Int(3),
            DatumKind::Float(2.5f64.to_bits()),
            DatumKind::Str(interner.intern("s")),
            DatumKind::Keyword(interner.intern("k")),
        ]
    );
}

#[test]
fn nested_lists_and_vectors() {
    let interner = StringInterner::new();
    let datum = read_one("(define [a b] (tuple 1 2))", &interner);
    assert_eq!(datum.span, Span::new(0, 26));
    assert_eq!(
        datum.display(&interner).to_string(),
        "(define [a b] (tuple 1 2))"
    );
    let DatumKind::List(items) = &datum.kind else {
        panic!("expected list, got {datum:?}");
    };
    assert!(matches!(items[1].kind, DatumKind::Vector(ref v) if v.len() == 2));
    assert_eq!(items[2].span, Span::new(14, 25));
}

#[test]
fn unquote_prefix_wraps_next_datum() {
    let interner = StringInterner::new();
    let datum = read_one("(f ~x ~@(g y))", &interner);
    assert_eq!(
        datum.display(&interner).to_string(),
        "(f (unquote x) (splice (g y)))"
    );
}

#[test]
fn stacked_prefixes() {
    let interner = StringInterner::new();
    let datum = read_one("~~x", &interner);
    assert_eq!(
        datum.display(&interner).to_string(),
        "(unquote (unquote x))"
    );
    assert_eq!(datum.span, Span::new(0, 3));
}

#[test]
fn unclosed_list() {
    let interner = StringInterner::new();
    let err = read("(block (f 1)", &interner).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnclosedDelimiter {
            open: '(',
            span: Span::new(0, 1)
        }
    );
}

#[test]
fn mismatched_close() {
    let interner = StringInterner::new();
    let err = read("(tuple 1]", &interner).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedClose {
            close: ']',
            span: Span::new(8, 9)
        }
    );
}

#[test]
fn stray_close() {
    let interner = StringInterner::new();
    let err = read("x)", &interner).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedClose { close: ')', .. }));
}

#[test]
fn dangling_prefix() {
    let interner = StringInterner::new();
    assert!(matches!(
        read("(f ~)", &interner).unwrap_err(),
        ParseError::DanglingPrefix { prefix: "~", .. }
    ));
    assert!(matches!(
        read("~@", &interner).unwrap_err(),
        ParseError::DanglingPrefix { prefix: "~@", .. }
    ));
}

#[test]
fn lex_errors_pass_through() {
    let interner = StringInterner::new();
    let err = read("\"open", &interner).unwrap_err();
    assert_eq!(err.code(), prob_diagnostic::ErrorCode::E0001);
}

#[test]
fn deep_nesting_does_not_recurse() {
    let interner = StringInterner::new();
    let depth = 50_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let datums = read(&source, &interner).unwrap();
    assert_eq!(datums.len(), 1);
    // Take the tree apart without recursive drop.
    let mut current = datums.into_iter().next().unwrap();
    let mut levels = 0;
    while let DatumKind::List(mut items) = current.kind {
        levels += 1;
        current = items.pop().unwrap();
    }
    assert_eq!(levels, depth);
}
