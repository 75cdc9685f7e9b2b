//! Core calculus.
//!
//! The desugarer's output. Blocks become `Let`/`LetRec`/`Seq`, tuple
//! patterns become an aggregate `Let` followed by `Index` projections, and
//! every binder is an atomic [`Name`].

use std::fmt;

use crate::ast::{fmt_literal, Literal};
use crate::{Name, StringInterner};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Core {
    /// Value of an empty block.
    Nil,
    Literal(Literal),
    Var(Name),
    This,
    /// Function of one argument; tuple parameter patterns are bound to a
    /// synthesized `param` and projected inside `body`.
    Lambda { param: Name, body: Box<Core> },
    If {
        predicate: Box<Core>,
        then_branch: Box<Core>,
        else_branch: Box<Core>,
    },
    /// Bind one name, then continue.
    Let {
        name: Name,
        value: Box<Core>,
        body: Box<Core>,
    },
    /// Bind a group of mutually visible functions, then continue.
    LetRec {
        bindings: Vec<(Name, Core)>,
        body: Box<Core>,
    },
    /// Evaluate left to right; the value is the last element's.
    Seq(Vec<Core>),
    Apply { func: Box<Core>, args: Vec<Core> },
    Tuple(Vec<Core>),
    /// Projection of component `index` out of a tuple value.
    Index { target: Box<Core>, index: usize },
    WithAddress { tag: Box<Core>, expr: Box<Core> },
    Splice(Box<Core>),
    Unquote(Box<Core>),
}

impl Core {
    /// `Let { name, value, body }`.
    pub fn bind(name: Name, value: Core, body: Core) -> Core {
        Core::Let {
            name,
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    /// `Index { target: Var(name), index }`.
    pub fn project(name: Name, index: usize) -> Core {
        Core::Index {
            target: Box::new(Core::Var(name)),
            index,
        }
    }

    /// Render in s-expression form.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> CoreDisplay<'a> {
        CoreDisplay {
            core: self,
            interner,
        }
    }
}

/// `Display` adapter for [`Core`].
pub struct CoreDisplay<'a> {
    core: &'a Core,
    interner: &'a StringInterner,
}

impl CoreDisplay<'_> {
    fn seq(&self, f: &mut fmt::Formatter<'_>, head: &str, items: &[Core]) -> fmt::Result {
        write!(f, "({head}")?;
        for item in items {
            write!(f, " {}", item.display(self.interner))?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for CoreDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        match self.core {
            Core::Nil => f.write_str("nil"),
            Core::Literal(lit) => fmt_literal(f, *lit, interner),
            Core::Var(name) => f.write_str(interner.lookup(*name)),
            Core::This => f.write_str("&this"),
            Core::Lambda { param, body } => write!(
                f,
                "(fn {} {})",
                interner.lookup(*param),
                body.display(interner)
            ),
            Core::If {
                predicate,
                then_branch,
                else_branch,
            } => write!(
                f,
                "(if {} {} {})",
                predicate.display(interner),
                then_branch.display(interner),
                else_branch.display(interner)
            ),
            Core::Let { name, value, body } => write!(
                f,
                "(let [{} {}] {})",
                interner.lookup(*name),
                value.display(interner),
                body.display(interner)
            ),
            Core::LetRec { bindings, body } => {
                f.write_str("(letrec [")?;
                for (i, (name, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{} {}", interner.lookup(*name), value.display(interner))?;
                }
                write!(f, "] {})", body.display(interner))
            }
            Core::Seq(items) => self.seq(f, "do", items),
            Core::Apply { func, args } => {
                write!(f, "({}", func.display(interner))?;
                for arg in args {
                    write!(f, " {}", arg.display(interner))?;
                }
                f.write_str(")")
            }
            Core::Tuple(items) => self.seq(f, "tuple", items),
            Core::Index { target, index } => {
                write!(f, "(nth {} {index})", target.display(interner))
            }
            Core::WithAddress { tag, expr } => write!(
                f,
                "(with-address {} {})",
                tag.display(interner),
                expr.display(interner)
            ),
            Core::Splice(expr) => write!(f, "(splice {})", expr.display(interner)),
            Core::Unquote(expr) => write!(f, "(unquote {})", expr.display(interner)),
        }
    }
}
