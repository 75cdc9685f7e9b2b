//! Binding-pattern destructuring.
//!
//! A tuple pattern binds its whole right-hand side to a synthesized name and
//! then each non-wildcard component to a projection of that name:
//!
//! ```text
//! [a [b _] c] = rhs
//!
//! [a|[b|_]|c] = rhs
//! a           = (nth [a|[b|_]|c] 0)
//! [b|_]       = (nth [a|[b|_]|c] 1)
//! b           = (nth [b|_] 0)
//! c           = (nth [a|[b|_]|c] 2)
//! ```
//!
//! Synthesized names are a pure function of the pattern's shape. They
//! always contain `[`, which the reader never puts in a symbol, and
//! components are joined with [`keywords::SEPARATOR`], which the form parser
//! rejects in identifiers.

use prob_ir::keywords;
use prob_ir::{Core, Name, Pattern, StringInterner};
use prob_stack::ensure_sufficient_stack;

/// Expand `pattern = rhs` into atomic bindings, aggregate first.
///
/// - A name binds `rhs` directly.
/// - A bare `_` binds the name `_` so `rhs` is still evaluated.
/// - A tuple binds its synthesized name, then projects each component.
///   Wildcard components produce nothing.
pub fn destructure(pattern: &Pattern, rhs: Core, interner: &StringInterner) -> Vec<(Name, Core)> {
    let mut bindings = Vec::new();
    match pattern {
        Pattern::Wildcard => bindings.push((interner.intern(keywords::WILDCARD), rhs)),
        _ => destructure_into(pattern, rhs, interner, &mut bindings),
    }
    bindings
}

fn destructure_into(
    pattern: &Pattern,
    rhs: Core,
    interner: &StringInterner,
    out: &mut Vec<(Name, Core)>,
) {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Name(name) => out.push((*name, rhs)),
        Pattern::Wildcard => {}
        Pattern::Tuple(items) => {
            let aggregate = synthesized_name(pattern, interner);
            out.push((aggregate, rhs));
            for (index, item) in items.iter().enumerate() {
                destructure_into(item, Core::project(aggregate, index), interner, out);
            }
        }
    });
}

/// Name a pattern binds its whole value to.
///
/// Atomic patterns are their own name; `_` is `_`; a tuple is its
/// components' names joined by `|` inside brackets.
pub fn synthesized_name(pattern: &Pattern, interner: &StringInterner) -> Name {
    match pattern {
        Pattern::Name(name) => *name,
        _ => {
            let mut text = String::new();
            write_name(pattern, interner, &mut text);
            interner.intern(&text)
        }
    }
}

fn write_name(pattern: &Pattern, interner: &StringInterner, out: &mut String) {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Name(name) => out.push_str(interner.lookup(*name)),
        Pattern::Wildcard => out.push_str(keywords::WILDCARD),
        Pattern::Tuple(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(keywords::SEPARATOR);
                }
                write_name(item, interner, out);
            }
            out.push(']');
        }
    });
}
