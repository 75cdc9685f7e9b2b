//! Surface AST → core calculus.
//!
//! Blocks are scanned back to front, carrying the continuation built so far:
//!
//! - an expression statement is prepended as a sequencing step;
//! - a definition whose value is a `program` literal and whose pattern is a
//!   name joins the `LetRec` directly after it, or opens a new one;
//! - any other definition is destructured and wraps the continuation in one
//!   `Let` per binding.
//!
//! A definition in final position gets `Var(bound name)` as its continuation
//! and raises a `W3001` warning. A definition outside any block, such as a
//! top-level one, gets the same continuation without a warning.

use prob_diagnostic::{Diagnostic, ErrorCode};
use prob_ir::{Core, Expr, ExprKind, Pattern, StringInterner};
use prob_stack::ensure_sufficient_stack;

use crate::destructure::{destructure, synthesized_name};

/// Desugar one expression, returning the core form and any warnings.
pub fn desugar(expr: &Expr, interner: &StringInterner) -> (Core, Vec<Diagnostic>) {
    let mut desugarer = Desugarer::new(interner);
    let core = desugarer.desugar_expr(expr);
    (core, desugarer.into_warnings())
}

/// Block-aware desugaring pass.
pub struct Desugarer<'a> {
    interner: &'a StringInterner,
    warnings: Vec<Diagnostic>,
}

/// Continuation under construction during a back-to-front block scan.
struct Continuation {
    core: Option<Core>,
    /// Expression statements seen since the last definition, last first.
    steps: Vec<Core>,
    /// `core` is a `LetRec` opened by the function definition just after
    /// the current position.
    open_group: bool,
}

impl Continuation {
    /// Fold pending expression steps into `core`.
    fn settle(&mut self) -> Option<Core> {
        if self.steps.is_empty() {
            return self.core.take();
        }
        let mut items: Vec<Core> = self.steps.drain(..).rev().collect();
        items.extend(self.core.take());
        self.open_group = false;
        Some(if items.len() == 1 {
            items.remove(0)
        } else {
            Core::Seq(items)
        })
    }
}

impl<'a> Desugarer<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Desugarer {
            interner,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Diagnostic> {
        self.warnings
    }

    pub fn desugar_expr(&mut self, expr: &Expr) -> Core {
        ensure_sufficient_stack(|| self.desugar_expr_inner(expr))
    }

    fn desugar_expr_inner(&mut self, expr: &Expr) -> Core {
        match &expr.kind {
            ExprKind::Program { pattern, body } => self.desugar_program(pattern, body),
            ExprKind::If {
                predicate,
                then_branch,
                else_branch,
            } => Core::If {
                predicate: Box::new(self.desugar_expr(predicate)),
                then_branch: Box::new(self.desugar_expr(then_branch)),
                else_branch: Box::new(
                    else_branch
                        .as_ref()
                        .map_or(Core::Nil, |e| self.desugar_expr(e)),
                ),
            },
            ExprKind::Block(stmts) => self.desugar_block(stmts),
            ExprKind::Define { pattern, value } => {
                let bound = Core::Var(synthesized_name(pattern, self.interner));
                self.define(pattern, value, bound, false)
            }
            ExprKind::WithAddress { tag, expr } => Core::WithAddress {
                tag: Box::new(self.desugar_expr(tag)),
                expr: Box::new(self.desugar_expr(expr)),
            },
            ExprKind::Tuple(items) => Core::Tuple(self.desugar_all(items)),
            ExprKind::Apply { func, args } => Core::Apply {
                func: Box::new(self.desugar_expr(func)),
                args: self.desugar_all(args),
            },
            ExprKind::Literal(lit) => Core::Literal(*lit),
            ExprKind::Var(name) => Core::Var(*name),
            ExprKind::This => Core::This,
            ExprKind::Splice(inner) => Core::Splice(Box::new(self.desugar_expr(inner))),
            ExprKind::Unquote(inner) => Core::Unquote(Box::new(self.desugar_expr(inner))),
        }
    }

    fn desugar_all(&mut self, exprs: &[Expr]) -> Vec<Core> {
        exprs.iter().map(|e| self.desugar_expr(e)).collect()
    }

    /// A one-parameter function. Tuple parameters are bound to their
    /// synthesized name and projected at the top of the body.
    fn desugar_program(&mut self, pattern: &Pattern, body: &[Expr]) -> Core {
        let body = self.desugar_block(body);
        let param = synthesized_name(pattern, self.interner);
        let projections = match pattern {
            Pattern::Tuple(_) => destructure(pattern, Core::Var(param), self.interner),
            Pattern::Name(_) | Pattern::Wildcard => Vec::new(),
        };
        // The first binding is the parameter itself.
        let body = projections
            .into_iter()
            .skip(1)
            .rev()
            .fold(body, |body, (name, value)| Core::bind(name, value, body));
        Core::Lambda {
            param,
            body: Box::new(body),
        }
    }

    /// Desugar a statement sequence.
    pub fn desugar_block(&mut self, stmts: &[Expr]) -> Core {
        let mut cont = Continuation {
            core: None,
            steps: Vec::new(),
            open_group: false,
        };

        for stmt in stmts.iter().rev() {
            let ExprKind::Define { pattern, value } = &stmt.kind else {
                let step = self.desugar_expr(stmt);
                cont.steps.push(step);
                continue;
            };

            let rest = match cont.settle() {
                Some(rest) => rest,
                None => self.late_definition(stmt, pattern),
            };
            cont.core = Some(self.define(pattern, value, rest, cont.open_group));
            cont.open_group = matches!(pattern, Pattern::Name(_)) && value.is_program();
        }

        cont.settle().unwrap_or(Core::Nil)
    }

    /// Bind `pattern` to `value` over `rest`. With `open_group`, `rest` is
    /// the `LetRec` of the function definitions just after this one.
    fn define(&mut self, pattern: &Pattern, value: &Expr, rest: Core, open_group: bool) -> Core {
        match pattern {
            Pattern::Name(name) if value.is_program() => {
                let function = self.desugar_expr(value);
                match rest {
                    Core::LetRec { mut bindings, body } if open_group => {
                        bindings.insert(0, (*name, function));
                        Core::LetRec { bindings, body }
                    }
                    rest => Core::LetRec {
                        bindings: vec![(*name, function)],
                        body: Box::new(rest),
                    },
                }
            }
            _ => {
                let rhs = self.desugar_expr(value);
                destructure(pattern, rhs, self.interner)
                    .into_iter()
                    .rev()
                    .fold(rest, |body, (name, value)| Core::bind(name, value, body))
            }
        }
    }

    /// Warn about a definition with nothing after it; the block evaluates
    /// to the bound value.
    fn late_definition(&mut self, stmt: &Expr, pattern: &Pattern) -> Core {
        let bound = synthesized_name(pattern, self.interner);
        let text = self.interner.lookup(bound);
        tracing::warn!(
            name = text,
            span = ?stmt.span,
            "definition is the last statement of its block"
        );
        self.warnings.push(
            Diagnostic::warning(ErrorCode::W3001)
                .with_message(format!(
                    "definition of `{text}` is the last statement of its block"
                ))
                .with_label(stmt.span, "nothing follows this definition")
                .with_note(format!("the block evaluates to `{text}`")),
        );
        Core::Var(bound)
    }
}
