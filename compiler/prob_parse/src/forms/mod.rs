//! Datums → surface AST.
//!
//! Dispatch is on the head of a list datum. The reserved form names map to
//! [`Form`]; every other head, including non-symbol heads such as
//! `((program [x] x) 1)`, falls through to application.

use prob_ir::keywords;
use prob_ir::{Datum, DatumKind, Expr, ExprKind, Literal, Name, Pattern, Span, StringInterner};
use prob_stack::ensure_sufficient_stack;

use crate::ParseError;

/// Recognized form heads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Form {
    Program,
    If,
    Block,
    Define,
    WithAddress,
    Tuple,
    This,
    Splice,
    Unquote,
}

impl Form {
    fn keyword(self) -> &'static str {
        match self {
            Form::Program => keywords::PROGRAM,
            Form::If => keywords::IF,
            Form::Block => keywords::BLOCK,
            Form::Define => keywords::DEFINE,
            Form::WithAddress => keywords::WITH_ADDRESS,
            Form::Tuple => keywords::TUPLE,
            Form::This => keywords::THIS,
            Form::Splice => keywords::SPLICE,
            Form::Unquote => keywords::UNQUOTE,
        }
    }
}

/// Recognize a single datum with a fresh [`FormParser`].
pub fn parse_expr(datum: &Datum, interner: &StringInterner) -> Result<Expr, ParseError> {
    FormParser::new(interner).parse_expr(datum)
}

/// Form recognizer.
///
/// Holds the interner plus pre-interned form names so head dispatch is a
/// `Name` comparison.
pub struct FormParser<'a> {
    interner: &'a StringInterner,
    forms: [(Name, Form); 9],
    name_self_reference: Name,
    name_wildcard: Name,
}

impl<'a> FormParser<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        let form = |f: Form| (interner.intern(f.keyword()), f);
        FormParser {
            interner,
            forms: [
                form(Form::Program),
                form(Form::If),
                form(Form::Block),
                form(Form::Define),
                form(Form::WithAddress),
                form(Form::Tuple),
                form(Form::This),
                form(Form::Splice),
                form(Form::Unquote),
            ],
            name_self_reference: interner.intern(keywords::SELF_REFERENCE),
            name_wildcard: interner.intern(keywords::WILDCARD),
        }
    }

    fn form_of(&self, head: &Datum) -> Option<Form> {
        let name = head.as_symbol()?;
        self.forms
            .iter()
            .find_map(|&(form_name, form)| (form_name == name).then_some(form))
    }

    fn render(&self, datum: &Datum) -> String {
        datum.display(self.interner).to_string()
    }

    /// Recognize one expression.
    pub fn parse_expr(&self, datum: &Datum) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner(datum))
    }

    fn parse_expr_inner(&self, datum: &Datum) -> Result<Expr, ParseError> {
        let span = datum.span;
        let kind = match &datum.kind {
            DatumKind::Nil => ExprKind::Literal(Literal::Nil),
            DatumKind::Bool(b) => ExprKind::Literal(Literal::Bool(*b)),
            DatumKind::Int(n) => ExprKind::Literal(Literal::Int(*n)),
            DatumKind::Float(bits) => ExprKind::Literal(Literal::Float(*bits)),
            DatumKind::Str(s) => ExprKind::Literal(Literal::Str(*s)),
            DatumKind::Keyword(k) => ExprKind::Literal(Literal::Keyword(*k)),
            DatumKind::Symbol(name) => {
                if *name == self.name_self_reference {
                    ExprKind::This
                } else {
                    ExprKind::Var(self.identifier(*name, span)?)
                }
            }
            DatumKind::Vector(_) => {
                return Err(ParseError::MalformedExpr {
                    term: self.render(datum),
                    reason: "a vector is only valid as a binding pattern; use `(tuple ...)`",
                    span,
                })
            }
            DatumKind::List(items) => match items.split_first() {
                None => {
                    return Err(ParseError::MalformedExpr {
                        term: self.render(datum),
                        reason: "an application needs an operator",
                        span,
                    })
                }
                Some((head, operands)) => self.parse_list(datum, head, operands)?,
            },
        };
        Ok(Expr::new(kind, span))
    }

    fn parse_list(
        &self,
        datum: &Datum,
        head: &Datum,
        operands: &[Datum],
    ) -> Result<ExprKind, ParseError> {
        let Some(form) = self.form_of(head) else {
            return Ok(ExprKind::Apply {
                func: Box::new(self.parse_expr(head)?),
                args: self.parse_all(operands)?,
            });
        };

        match form {
            Form::Program => {
                let (pattern, body) = operands
                    .split_first()
                    .ok_or_else(|| self.arity(form, "a parameter pattern", datum, operands))?;
                Ok(ExprKind::Program {
                    pattern: self.parse_pattern(pattern)?,
                    body: self.parse_all(body)?,
                })
            }
            Form::If => match operands {
                [predicate, then_branch] => Ok(ExprKind::If {
                    predicate: Box::new(self.parse_expr(predicate)?),
                    then_branch: Box::new(self.parse_expr(then_branch)?),
                    else_branch: None,
                }),
                [predicate, then_branch, else_branch] => Ok(ExprKind::If {
                    predicate: Box::new(self.parse_expr(predicate)?),
                    then_branch: Box::new(self.parse_expr(then_branch)?),
                    else_branch: Some(Box::new(self.parse_expr(else_branch)?)),
                }),
                _ => Err(self.arity(form, "2 or 3 operands", datum, operands)),
            },
            Form::Block => Ok(ExprKind::Block(self.parse_all(operands)?)),
            Form::Define => match operands {
                [pattern, value] => Ok(ExprKind::Define {
                    pattern: self.parse_pattern(pattern)?,
                    value: Box::new(self.parse_expr(value)?),
                }),
                _ => Err(self.arity(form, "a pattern and a value", datum, operands)),
            },
            Form::WithAddress => match operands {
                [tag, expr] => Ok(ExprKind::WithAddress {
                    tag: Box::new(self.parse_expr(tag)?),
                    expr: Box::new(self.parse_expr(expr)?),
                }),
                _ => Err(self.arity(form, "a tag and an expression", datum, operands)),
            },
            Form::Tuple => Ok(ExprKind::Tuple(self.parse_all(operands)?)),
            Form::This => match operands {
                [] => Ok(ExprKind::This),
                _ => Err(self.arity(form, "no operands", datum, operands)),
            },
            Form::Splice | Form::Unquote => match operands {
                [expr] => {
                    let expr = Box::new(self.parse_expr(expr)?);
                    Ok(if form == Form::Splice {
                        ExprKind::Splice(expr)
                    } else {
                        ExprKind::Unquote(expr)
                    })
                }
                _ => Err(self.arity(form, "exactly one operand", datum, operands)),
            },
        }
    }

    fn parse_all(&self, datums: &[Datum]) -> Result<Vec<Expr>, ParseError> {
        datums.iter().map(|d| self.parse_expr(d)).collect()
    }

    /// Recognize a binding pattern: a name, `_`, `[p ...]` or `(tuple p ...)`.
    pub fn parse_pattern(&self, datum: &Datum) -> Result<Pattern, ParseError> {
        ensure_sufficient_stack(|| match &datum.kind {
            DatumKind::Symbol(name) if *name == self.name_wildcard => Ok(Pattern::Wildcard),
            DatumKind::Symbol(name) => Ok(Pattern::Name(self.binder(*name, datum.span)?)),
            DatumKind::Vector(items) => self.parse_tuple_pattern(items),
            DatumKind::List(items)
                if items.first().and_then(|h| self.form_of(h)) == Some(Form::Tuple) =>
            {
                self.parse_tuple_pattern(&items[1..])
            }
            _ => Err(ParseError::MalformedPattern {
                term: self.render(datum),
                span: datum.span,
            }),
        })
    }

    fn parse_tuple_pattern(&self, items: &[Datum]) -> Result<Pattern, ParseError> {
        items
            .iter()
            .map(|item| self.parse_pattern(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Pattern::Tuple)
    }

    /// Validate an identifier in reference position.
    fn identifier(&self, name: Name, span: Span) -> Result<Name, ParseError> {
        if name == self.name_wildcard {
            return Err(ParseError::WildcardReference { span });
        }
        let text = self.interner.lookup(name);
        if keywords::is_keyword(text) {
            return Err(ParseError::ReservedKeyword {
                name: text.to_owned(),
                span,
            });
        }
        if text.contains(keywords::SEPARATOR) {
            return Err(ParseError::ReservedSeparator {
                name: text.to_owned(),
                span,
            });
        }
        Ok(name)
    }

    /// Validate an identifier in binding position; `&this` cannot be rebound.
    fn binder(&self, name: Name, span: Span) -> Result<Name, ParseError> {
        if name == self.name_self_reference {
            return Err(ParseError::ReservedKeyword {
                name: keywords::SELF_REFERENCE.to_owned(),
                span,
            });
        }
        self.identifier(name, span)
    }

    fn arity(
        &self,
        form: Form,
        expected: &'static str,
        datum: &Datum,
        operands: &[Datum],
    ) -> ParseError {
        tracing::debug!(form = form.keyword(), found = operands.len(), "form arity mismatch");
        ParseError::Arity {
            form: form.keyword(),
            expected,
            found: operands.len(),
            term: self.render(datum),
            span: datum.span,
        }
    }
}
