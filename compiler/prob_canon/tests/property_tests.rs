//! Property-based tests for destructuring and desugaring.
//!
//! Patterns and blocks are generated as surface text so every case also
//! goes through the reader and form recognition.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use prob_canon::{compile_expr, desugar, destructure, synthesized_name};
use prob_ir::{Core, ExprKind, Pattern, StringInterner};
use prob_parse::parse_source;
use proptest::prelude::*;

// -- Strategies --

/// Words the reader or form parser will not accept as a binder.
fn is_reserved(s: &str) -> bool {
    prob_ir::keywords::is_keyword(s) || matches!(s, "nil" | "true" | "false")
}

/// Component of a flat tuple pattern: a name or `_`.
fn component_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        3 => prop::string::string_regex("[a-z][a-z0-9]{0,6}")
            .expect("valid regex")
            .prop_filter("not reserved", |s| !is_reserved(s))
            .prop_map(Some),
    ]
}

fn flat_pattern_text(components: &[Option<String>]) -> String {
    let parts: Vec<&str> = components
        .iter()
        .map(|c| c.as_deref().unwrap_or("_"))
        .collect();
    format!("[{}]", parts.join(" "))
}

/// Arbitrary nesting of names, wildcards and tuples.
fn nested_pattern_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("_".to_string()),
        prop::string::string_regex("[a-z]{1,4}")
            .expect("valid regex")
            .prop_filter("not reserved", |s| !is_reserved(s)),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|items| format!("[{}]", items.join(" ")))
    })
}

fn parse_pattern(text: &str, interner: &StringInterner) -> Pattern {
    let source = format!("(define {text} v)");
    let exprs = parse_source(&source, interner).unwrap();
    match &exprs[0].kind {
        ExprKind::Define { pattern, .. } => pattern.clone(),
        other => panic!("expected define, got {other:?}"),
    }
}

fn count_leaves(pattern: &Pattern) -> usize {
    match pattern {
        Pattern::Name(_) => 1,
        Pattern::Wildcard => 0,
        Pattern::Tuple(items) => items.iter().map(count_leaves).sum(),
    }
}

fn count_tuples(pattern: &Pattern) -> usize {
    match pattern {
        Pattern::Tuple(items) => 1 + items.iter().map(count_tuples).sum::<usize>(),
        _ => 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A flat tuple with `k` named components yields `k + 1` bindings.
    #[test]
    fn flat_tuple_binding_count(components in prop::collection::vec(component_strategy(), 0..8)) {
        let interner = StringInterner::new();
        let pattern = parse_pattern(&flat_pattern_text(&components), &interner);
        let named = components.iter().filter(|c| c.is_some()).count();
        let bindings = destructure(&pattern, Core::Nil, &interner);
        prop_assert_eq!(bindings.len(), named + 1);
        prop_assert_eq!(bindings[0].0, synthesized_name(&pattern, &interner));
        prop_assert_eq!(&bindings[0].1, &Core::Nil);
    }

    /// Nested patterns bind every tuple aggregate and every named leaf, and
    /// every projection refers to an aggregate bound earlier.
    #[test]
    fn nested_binding_count_and_order(text in nested_pattern_strategy()) {
        let interner = StringInterner::new();
        let pattern = parse_pattern(&text, &interner);
        let bindings = destructure(&pattern, Core::Nil, &interner);

        // One binding per tuple and per named leaf; a bare `_` binds once.
        let expected = match &pattern {
            Pattern::Wildcard => 1,
            _ => count_leaves(&pattern) + count_tuples(&pattern),
        };
        prop_assert_eq!(bindings.len(), expected);

        for (i, (_, value)) in bindings.iter().enumerate() {
            if let Core::Index { target, .. } = value {
                let Core::Var(source) = **target else {
                    return Err(TestCaseError::fail("projection of a non-variable"));
                };
                prop_assert!(bindings[..i].iter().any(|(n, _)| *n == source));
            }
        }
    }

    /// Synthesized names depend on the pattern's shape only.
    #[test]
    fn synthesized_names_are_deterministic(text in nested_pattern_strategy()) {
        let first = StringInterner::new();
        let second = StringInterner::new();
        let a = synthesized_name(&parse_pattern(&text, &first), &first);
        let b = synthesized_name(&parse_pattern(&text, &second), &second);
        prop_assert_eq!(first.lookup(a), second.lookup(b));
    }

    /// `n` consecutive function definitions before a tail form one group.
    #[test]
    fn function_run_is_one_group(n in 1usize..8) {
        let interner = StringInterner::new();
        let defs: String = (0..n)
            .map(|i| format!("(define f{i} (program x (f{} x))) ", (i + 1) % n))
            .collect();
        let source = format!("(block {defs}(f0 1))");
        let exprs = parse_source(&source, &interner).unwrap();
        let (core, warnings) = desugar(&exprs[0], &interner);
        prop_assert!(warnings.is_empty());
        match core {
            Core::LetRec { bindings, body } => {
                prop_assert_eq!(bindings.len(), n);
                let nested = matches!(*body, Core::LetRec { .. });
                prop_assert!(!nested);
            }
            other => return Err(TestCaseError::fail(format!("expected letrec, got {other:?}"))),
        }
    }

    /// Compiling the same text twice gives equal trees.
    #[test]
    fn tree_compilation_is_deterministic(text in nested_pattern_strategy()) {
        let source = format!("(program {text} (define {text} (f 1)) 0)");
        let first = StringInterner::new();
        let second = StringInterner::new();
        let a = compile_expr(&parse_source(&source, &first).unwrap()[0], &first).unwrap();
        let b = compile_expr(&parse_source(&source, &second).unwrap()[0], &second).unwrap();
        prop_assert_eq!(a, b);
    }
}
