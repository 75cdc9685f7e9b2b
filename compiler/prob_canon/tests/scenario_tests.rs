//! End-to-end compilation of surface text.
//!
//! Each test reads source text, compiles it through `Compiler` with the
//! in-memory trie, and checks the trace tree, the core form, or both.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use prob_canon::schema::tag;
use prob_canon::{
    check_shape, CompileError, CompileOptions, CompiledModule, Compiler, ErrorClass,
    NamespaceTable,
};
use prob_diagnostic::{ErrorCode, Severity};
use prob_ir::{Core, Literal, StringInterner};
use prob_trie::{Address, MemoryTrie, Node, Value};

fn compile(source: &str, interner: &StringInterner) -> Result<CompiledModule, CompileError> {
    let env = NamespaceTable::new();
    Compiler::new(interner, &MemoryTrie, &env, CompileOptions::default()).compile_source(source)
}

fn compile_one(source: &str, interner: &StringInterner) -> prob_canon::CompiledForm {
    let mut module = compile(source, interner).unwrap();
    assert_eq!(module.forms.len(), 1, "expected one form in {source:?}");
    module.forms.remove(0)
}

fn at<'n>(node: &'n Node, path: &str) -> &'n Node {
    node.get(&path.parse::<Address>().unwrap())
        .unwrap_or_else(|| panic!("no node at {path} in\n{node}"))
}

fn leaf<'n>(node: &'n Node, path: &str) -> &'n Value {
    at(node, path).value().expect("leaf value")
}

fn sym(s: &str) -> Value {
    Value::Symbol(s.to_string())
}

#[test]
fn program_binding_its_parameter() {
    let interner = StringInterner::new();
    let form = compile_one("(program x x)", &interner);
    assert_eq!(form.tree.tag(), Some(tag::PROGRAM));
    assert_eq!(at(&form.tree, "pattern").tag(), Some(tag::VARIABLE));
    assert_eq!(leaf(&form.tree, "pattern/name"), &sym("x"));
    assert_eq!(at(&form.tree, "body").tag(), Some(tag::VARIABLE));
    assert_eq!(leaf(&form.tree, "body/name"), &sym("x"));
    assert_eq!(
        form.tree.to_string(),
        "program\n  pattern: variable\n    name: x\n  body: variable\n    name: x"
    );
}

#[test]
fn definition_followed_by_use() {
    let interner = StringInterner::new();
    let form = compile_one("(block (define x 1) x)", &interner);
    let x = interner.intern("x");
    assert_eq!(
        form.core,
        Core::bind(x, Core::Literal(Literal::Int(1)), Core::Var(x))
    );
    assert!(form.warnings.is_empty());

    assert_eq!(form.tree.tag(), Some(tag::BLOCK));
    assert_eq!(at(&form.tree, "0").tag(), Some(tag::DEFINITION));
    assert_eq!(leaf(&form.tree, "0/x/value"), &Value::Int(1));
}

#[test]
fn tuple_definition_projects_each_component() {
    let interner = StringInterner::new();
    let form = compile_one("(block (define [a b] (tuple 1 2)) (f a b))", &interner);

    let agg = interner.intern("[a|b]");
    let a = interner.intern("a");
    let b = interner.intern("b");
    let Core::Let { name, value, body } = &form.core else {
        panic!("expected let, got {:?}", form.core);
    };
    assert_eq!(*name, agg);
    assert!(matches!(**value, Core::Tuple(ref items) if items.len() == 2));
    let Core::Let { name, value, body } = &**body else {
        panic!("expected projection of a");
    };
    assert_eq!((*name, &**value), (a, &Core::project(agg, 0)));
    let Core::Let { name, value, .. } = &**body else {
        panic!("expected projection of b");
    };
    assert_eq!((*name, &**value), (b, &Core::project(agg, 1)));

    let definition = at(&form.tree, "0");
    assert_eq!(
        definition.field_names().collect::<Vec<_>>(),
        vec!["pattern", "definiens"]
    );
    assert_eq!(leaf(definition, "pattern/1/name"), &sym("b"));
}

#[test]
fn trailing_definition_warns_once() {
    let interner = StringInterner::new();
    let form = compile_one("(block (log 1) (define answer 42))", &interner);
    assert_eq!(form.warnings.len(), 1);
    let warning = &form.warnings[0];
    assert_eq!(warning.code, ErrorCode::W3001);
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.message.contains("answer"), "{}", warning.message);
    assert_eq!(
        form.core.display(&interner).to_string(),
        "(do (log 1) (let [answer 42] answer))"
    );
    assert_eq!(at(&form.tree, "1").tag(), Some(tag::DEFINITION));
}

#[test]
fn keyword_as_variable_is_rejected() {
    let interner = StringInterner::new();
    for source in ["(f block)", "(define x if)", "(program [a tuple] a)", "splice"] {
        let err = compile(source, &interner).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Naming, "{source}");
        assert_eq!(err.code(), ErrorCode::E2001, "{source}");
    }
}

#[test]
fn separator_in_identifier_is_rejected() {
    let interner = StringInterner::new();
    let err = compile("(define a|b 1)", &interner).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Naming);
    assert_eq!(err.code(), ErrorCode::E2002);
}

#[test]
fn malformed_terms_are_structural_errors() {
    let interner = StringInterner::new();
    for source in ["()", "[1 2]", "(if)", "(define x)", "(with-address t)", "(define 3 x)"] {
        let err = compile(source, &interner).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Structural, "{source}");
        assert!(err.code().is_structural_error(), "{source}: {:?}", err.code());
    }
}

#[test]
fn compiling_twice_is_deterministic() {
    let source = "
        (define model
          (program [mu sigma]
            (define [x _] (tuple (gaussian mu sigma) 0))
            (with-address \"obs\" (observe (gaussian x 1.0) 2.5))
            x))
        (model (tuple 0 1))
    ";
    let first_interner = StringInterner::new();
    let second_interner = StringInterner::new();
    let first = compile(source, &first_interner).unwrap();
    let second = compile(source, &second_interner).unwrap();

    assert_eq!(first.forms.len(), second.forms.len());
    for (a, b) in first.forms.iter().zip(&second.forms) {
        assert_eq!(a.tree, b.tree);
        assert_eq!(
            a.core.display(&first_interner).to_string(),
            b.core.display(&second_interner).to_string()
        );
    }
    let first_keys: Vec<_> = first.procedures().map(|p| p.identity).collect();
    let second_keys: Vec<_> = second.procedures().map(|p| p.identity).collect();
    assert_eq!(first_keys.len(), 1);
    assert_eq!(first_keys, second_keys);
}

#[test]
fn mutually_recursive_functions_share_a_group() {
    let interner = StringInterner::new();
    let form = compile_one(
        "(block
           (define walk (program n (if (done? n) n (step (dec n)))))
           (define step (program n (walk (jitter n))))
           (define jitter (program n (gaussian n 1)))
           (walk 10))",
        &interner,
    );
    let Core::LetRec { bindings, body } = &form.core else {
        panic!("expected letrec, got {}", form.core.display(&interner));
    };
    let names: Vec<&str> = bindings.iter().map(|(n, _)| interner.lookup(*n)).collect();
    assert_eq!(names, vec!["walk", "step", "jitter"]);
    assert!(bindings.iter().all(|(_, v)| matches!(v, Core::Lambda { .. })));
    assert!(matches!(**body, Core::Apply { .. }));
}

#[test]
fn every_form_has_its_table_shape() {
    let interner = StringInterner::new();
    let source = "
        (program [p _]
          (define f (program x (tuple x &this (this))))
          (define [a [b c]] (f p))
          (if (flip 0.5)
              (with-address :site (splice (f a)))
              (unquote (block b c nil true \"s\" 1.5))))
        (if p q)
    ";
    let module = compile(source, &interner).unwrap();
    for form in &module.forms {
        assert_eq!(check_shape(&form.tree), Ok(()), "\n{}", form.tree);
    }
    let mut tags = std::collections::BTreeSet::new();
    for form in &module.forms {
        form.tree.walk(|_, node| {
            if let Some(t) = node.tag() {
                tags.insert(t.to_string());
            }
        });
    }
    for expected in tag::ALL {
        assert!(tags.contains(*expected), "no `{expected}` node emitted");
    }
}

#[test]
fn addresses_are_stable_paths() {
    let interner = StringInterner::new();
    let form = compile_one(
        "(program x (with-address \"coin\" (flip 0.5)) (flip 0.1))",
        &interner,
    );
    let mut addresses = Vec::new();
    form.tree.walk(|addr, node| {
        if node.has_tag(tag::APPLICATION) {
            addresses.push(addr.to_string());
        }
    });
    assert_eq!(addresses, vec!["body/0/expression", "body/1"]);
    assert_eq!(
        leaf(&form.tree, "body/0/expression/1/value"),
        &Value::Float(0.5)
    );
}
