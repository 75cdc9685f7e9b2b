//! Reader output: untyped surface terms.
//!
//! A `Datum` is what the reader produces before any form is recognized.
//! Floats are stored as `u64` bits so datums stay `Eq + Hash`.

use std::fmt;

use crate::{Name, Span, StringInterner};

/// A surface term with its source location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Datum {
    pub kind: DatumKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DatumKind {
    Nil,
    Bool(bool),
    Int(i64),
    /// IEEE-754 bits of an `f64`.
    Float(u64),
    Str(Name),
    /// `:name`, stored without the leading colon.
    Keyword(Name),
    Symbol(Name),
    /// `( ... )`
    List(Vec<Datum>),
    /// `[ ... ]`
    Vector(Vec<Datum>),
}

impl Datum {
    pub fn new(kind: DatumKind, span: Span) -> Self {
        Datum { kind, span }
    }

    /// The symbol name, if this datum is a symbol.
    pub fn as_symbol(&self) -> Option<Name> {
        match self.kind {
            DatumKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Render this datum back to surface text.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> DatumDisplay<'a> {
        DatumDisplay {
            datum: self,
            interner,
        }
    }
}

/// `Display` adapter that resolves names through an interner.
pub struct DatumDisplay<'a> {
    datum: &'a Datum,
    interner: &'a StringInterner,
}

impl fmt::Display for DatumDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        let seq = |f: &mut fmt::Formatter<'_>, open: &str, items: &[Datum], close: &str| {
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", item.display(interner))?;
            }
            f.write_str(close)
        };
        match &self.datum.kind {
            DatumKind::Nil => f.write_str("nil"),
            DatumKind::Bool(b) => write!(f, "{b}"),
            DatumKind::Int(n) => write!(f, "{n}"),
            DatumKind::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            DatumKind::Str(s) => write!(f, "{:?}", interner.lookup(*s)),
            DatumKind::Keyword(k) => write!(f, ":{}", interner.lookup(*k)),
            DatumKind::Symbol(s) => f.write_str(interner.lookup(*s)),
            DatumKind::List(items) => seq(f, "(", items, ")"),
            DatumKind::Vector(items) => seq(f, "[", items, "]"),
        }
    }
}
