//! Surface AST.
//!
//! Produced by form recognition over reader datums. Every list datum whose
//! head is a reserved form name becomes the matching variant; every other
//! non-empty list becomes [`ExprKind::Apply`].

use std::fmt;

use crate::keywords;
use crate::{Name, Span, StringInterner};

/// Atomic constant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    /// IEEE-754 bits of an `f64`.
    Float(u64),
    Str(Name),
    Keyword(Name),
}

/// Binding pattern.
///
/// Patterns only exist at compile time: the desugarer flattens them into
/// atomic bindings and the trie compiler records their shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// A single bound identifier.
    Name(Name),
    /// `_`, never bound.
    Wildcard,
    /// `[p0 p1 ...]`
    Tuple(Vec<Pattern>),
}

impl Pattern {
    #[inline]
    pub fn is_atomic(&self) -> bool {
        matches!(self, Pattern::Name(_))
    }

    /// Identifiers bound by this pattern, left to right.
    pub fn bound_names(&self) -> Vec<Name> {
        fn collect(pattern: &Pattern, out: &mut Vec<Name>) {
            match pattern {
                Pattern::Name(name) => out.push(*name),
                Pattern::Wildcard => {}
                Pattern::Tuple(items) => items.iter().for_each(|p| collect(p, out)),
            }
        }
        let mut names = Vec::new();
        collect(self, &mut names);
        names
    }

    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> PatternDisplay<'a> {
        PatternDisplay {
            pattern: self,
            interner,
        }
    }
}

/// Surface expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// `(program PATTERN body...)`
    Program { pattern: Pattern, body: Vec<Expr> },
    /// `(if predicate then [else])`
    If {
        predicate: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    /// `(block stmt...)`
    Block(Vec<Expr>),
    /// `(define PATTERN value)`
    Define { pattern: Pattern, value: Box<Expr> },
    /// `(with-address tag expr)`
    WithAddress { tag: Box<Expr>, expr: Box<Expr> },
    /// `(tuple item...)`
    Tuple(Vec<Expr>),
    /// `(func arg...)`, the default for any unrecognized head.
    Apply { func: Box<Expr>, args: Vec<Expr> },
    Literal(Literal),
    Var(Name),
    /// `&this` or `(this)`
    This,
    /// `(splice expr)` / `~@expr`
    Splice(Box<Expr>),
    /// `(unquote expr)` / `~expr`
    Unquote(Box<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Whether this expression is a function literal.
    #[inline]
    pub fn is_program(&self) -> bool {
        matches!(self.kind, ExprKind::Program { .. })
    }

    /// Render this expression back to surface text.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ExprDisplay<'a> {
        ExprDisplay {
            expr: self,
            interner,
        }
    }
}

/// `Display` adapter for [`Pattern`].
pub struct PatternDisplay<'a> {
    pattern: &'a Pattern,
    interner: &'a StringInterner,
}

impl fmt::Display for PatternDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern {
            Pattern::Name(name) => f.write_str(self.interner.lookup(*name)),
            Pattern::Wildcard => f.write_str(keywords::WILDCARD),
            Pattern::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item.display(self.interner))?;
                }
                f.write_str("]")
            }
        }
    }
}

/// `Display` adapter for [`Expr`].
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    interner: &'a StringInterner,
}

impl ExprDisplay<'_> {
    fn form(
        &self,
        f: &mut fmt::Formatter<'_>,
        head: &str,
        parts: &[&dyn fmt::Display],
    ) -> fmt::Result {
        write!(f, "({head}")?;
        for part in parts {
            write!(f, " {part}")?;
        }
        f.write_str(")")
    }

    fn list(&self, f: &mut fmt::Formatter<'_>, head: Option<&str>, items: &[Expr]) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        if let Some(head) = head {
            f.write_str(head)?;
            first = false;
        }
        for item in items {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}", item.display(self.interner))?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        match &self.expr.kind {
            ExprKind::Program { pattern, body } => {
                write!(f, "({} {}", keywords::PROGRAM, pattern.display(interner))?;
                for stmt in body {
                    write!(f, " {}", stmt.display(interner))?;
                }
                f.write_str(")")
            }
            ExprKind::If {
                predicate,
                then_branch,
                else_branch,
            } => {
                let predicate = predicate.display(interner);
                let then_branch = then_branch.display(interner);
                match else_branch {
                    Some(else_branch) => self.form(
                        f,
                        keywords::IF,
                        &[&predicate, &then_branch, &else_branch.display(interner)],
                    ),
                    None => self.form(f, keywords::IF, &[&predicate, &then_branch]),
                }
            }
            ExprKind::Block(stmts) => self.list(f, Some(keywords::BLOCK), stmts),
            ExprKind::Define { pattern, value } => self.form(
                f,
                keywords::DEFINE,
                &[&pattern.display(interner), &value.display(interner)],
            ),
            ExprKind::WithAddress { tag, expr } => self.form(
                f,
                keywords::WITH_ADDRESS,
                &[&tag.display(interner), &expr.display(interner)],
            ),
            ExprKind::Tuple(items) => self.list(f, Some(keywords::TUPLE), items),
            ExprKind::Apply { func, args } => {
                write!(f, "({}", func.display(interner))?;
                for arg in args {
                    write!(f, " {}", arg.display(interner))?;
                }
                f.write_str(")")
            }
            ExprKind::Literal(lit) => fmt_literal(f, *lit, interner),
            ExprKind::Var(name) => f.write_str(interner.lookup(*name)),
            ExprKind::This => f.write_str(keywords::SELF_REFERENCE),
            ExprKind::Splice(expr) => self.form(f, keywords::SPLICE, &[&expr.display(interner)]),
            ExprKind::Unquote(expr) => {
                self.form(f, keywords::UNQUOTE, &[&expr.display(interner)])
            }
        }
    }
}

pub(crate) fn fmt_literal(
    f: &mut fmt::Formatter<'_>,
    lit: Literal,
    interner: &StringInterner,
) -> fmt::Result {
    match lit {
        Literal::Nil => f.write_str("nil"),
        Literal::Bool(b) => write!(f, "{b}"),
        Literal::Int(n) => write!(f, "{n}"),
        Literal::Float(bits) => write!(f, "{:?}", f64::from_bits(bits)),
        Literal::Str(s) => write!(f, "{:?}", interner.lookup(s)),
        Literal::Keyword(k) => write!(f, ":{}", interner.lookup(k)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_names_skip_wildcards() {
        let interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let pattern = Pattern::Tuple(vec![
            Pattern::Name(a),
            Pattern::Wildcard,
            Pattern::Tuple(vec![Pattern::Name(b)]),
        ]);
        assert_eq!(pattern.bound_names(), vec![a, b]);
        assert!(!pattern.is_atomic());
    }

    #[test]
    fn expr_display_round_trips_surface_text() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let f = interner.intern("f");
        let expr = Expr::new(
            ExprKind::Program {
                pattern: Pattern::Tuple(vec![Pattern::Name(x)]),
                body: vec![Expr::new(
                    ExprKind::Apply {
                        func: Box::new(Expr::new(ExprKind::Var(f), Span::DUMMY)),
                        args: vec![
                            Expr::new(ExprKind::Var(x), Span::DUMMY),
                            Expr::new(ExprKind::Literal(Literal::Int(1)), Span::DUMMY),
                        ],
                    },
                    Span::DUMMY,
                )],
            },
            Span::DUMMY,
        );
        assert_eq!(expr.display(&interner).to_string(), "(program [x] (f x 1))");
    }
}
