//! Surface AST → trace tree.
//!
//! One node per syntactic form, dispatched on the closed [`ExprKind`]
//! vocabulary (see [`crate::schema`] for the node table). Every node is
//! checked with [`TrieService::is_node`] as it is emitted, so a malformed
//! node is reported against the term that produced it.

use prob_ir::{Expr, ExprKind, Literal, Pattern, Span, StringInterner};
use prob_stack::ensure_sufficient_stack;
use prob_trie::{Node, TrieService, Value};

use crate::schema::{field, tag};
use crate::CompileError;

/// Compiles surface expressions into trace-tree nodes.
pub struct TrieCompiler<'a> {
    trie: &'a dyn TrieService,
    interner: &'a StringInterner,
    check_nodes: bool,
}

impl<'a> TrieCompiler<'a> {
    pub fn new(trie: &'a dyn TrieService, interner: &'a StringInterner) -> Self {
        TrieCompiler {
            trie,
            interner,
            check_nodes: true,
        }
    }

    /// Turn the per-node `is_node` check on or off.
    #[must_use]
    pub fn with_node_check(mut self, check_nodes: bool) -> Self {
        self.check_nodes = check_nodes;
        self
    }

    pub fn compile_expr(&self, expr: &Expr) -> Result<Node, CompileError> {
        ensure_sufficient_stack(|| self.compile_expr_inner(expr))
    }

    fn compile_expr_inner(&self, expr: &Expr) -> Result<Node, CompileError> {
        let node = match &expr.kind {
            ExprKind::Program { pattern, body } => self.keyed(
                tag::PROGRAM,
                vec![
                    (field::PATTERN, self.compile_pattern(pattern, expr)?),
                    (field::BODY, self.compile_body(body, expr)?),
                ],
            ),
            ExprKind::If {
                predicate,
                then_branch,
                else_branch,
            } => {
                let else_node = match else_branch {
                    Some(e) => self.compile_expr(e)?,
                    None => self.literal(Literal::Nil, expr)?,
                };
                self.keyed(
                    tag::IF,
                    vec![
                        (field::PREDICATE, self.compile_expr(predicate)?),
                        (field::THEN, self.compile_expr(then_branch)?),
                        (field::ELSE, else_node),
                    ],
                )
            }
            ExprKind::Block(stmts) => self.sequence(tag::BLOCK, stmts)?,
            ExprKind::Define { pattern, value } => self.compile_definition(pattern, value, expr)?,
            ExprKind::WithAddress { tag: address, expr: inner } => self.keyed(
                tag::WITH_ADDRESS,
                vec![
                    (field::TAG, self.compile_expr(address)?),
                    (field::EXPRESSION, self.compile_expr(inner)?),
                ],
            ),
            ExprKind::Tuple(items) => self.sequence(tag::TUPLE, items)?,
            ExprKind::Apply { func, args } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                children.push(self.compile_expr(func)?);
                for arg in args {
                    children.push(self.compile_expr(arg)?);
                }
                self.trie.make_sequence(tag::APPLICATION, children)
            }
            ExprKind::Literal(lit) => return self.literal(*lit, expr),
            ExprKind::Var(name) => return self.variable(self.interner.lookup(*name), expr),
            ExprKind::This => self.trie.make_keyed(tag::THIS, Vec::new()),
            ExprKind::Splice(inner) => self.keyed(
                tag::SPLICE,
                vec![(field::EXPRESSION, self.compile_expr(inner)?)],
            ),
            ExprKind::Unquote(inner) => self.keyed(
                tag::UNQUOTE,
                vec![(field::EXPRESSION, self.compile_expr(inner)?)],
            ),
        };
        self.emit(node, expr)
    }

    /// A single statement is the body; anything else is wrapped in a block.
    fn compile_body(&self, body: &[Expr], owner: &Expr) -> Result<Node, CompileError> {
        match body {
            [stmt] => self.compile_expr(stmt),
            _ => {
                let block = self.sequence(tag::BLOCK, body)?;
                self.emit(block, owner)
            }
        }
    }

    fn compile_definition(
        &self,
        pattern: &Pattern,
        value: &Expr,
        owner: &Expr,
    ) -> Result<Node, CompileError> {
        let pattern_node = self.compile_pattern(pattern, owner)?;
        let value_node = self.compile_expr(value)?;
        let value_field = match pattern {
            Pattern::Name(name) => {
                let text = self.interner.lookup(*name);
                if text == field::PATTERN {
                    return Err(CompileError::FieldCollision {
                        name: text.to_owned(),
                        span: owner.span,
                    });
                }
                text
            }
            Pattern::Wildcard | Pattern::Tuple(_) => field::DEFINIENS,
        };
        Ok(self.keyed(
            tag::DEFINITION,
            vec![(field::PATTERN, pattern_node), (value_field, value_node)],
        ))
    }

    /// Patterns compile to the nodes of the expressions they mirror.
    fn compile_pattern(&self, pattern: &Pattern, owner: &Expr) -> Result<Node, CompileError> {
        ensure_sufficient_stack(|| match pattern {
            Pattern::Name(name) => self.variable(self.interner.lookup(*name), owner),
            Pattern::Wildcard => self.variable(prob_ir::keywords::WILDCARD, owner),
            Pattern::Tuple(items) => {
                let children = items
                    .iter()
                    .map(|item| self.compile_pattern(item, owner))
                    .collect::<Result<Vec<_>, _>>()?;
                let node = self.trie.make_sequence(tag::TUPLE, children);
                self.check(node, || pattern.display(self.interner).to_string(), owner.span)
            }
        })
    }

    fn sequence(&self, tag: &str, items: &[Expr]) -> Result<Node, CompileError> {
        let children = items
            .iter()
            .map(|item| self.compile_expr(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.trie.make_sequence(tag, children))
    }

    fn keyed(&self, tag: &str, fields: Vec<(&str, Node)>) -> Node {
        let fields = fields
            .into_iter()
            .map(|(key, node)| (key.to_owned(), node))
            .collect();
        self.trie.make_keyed(tag, fields)
    }

    fn literal(&self, lit: Literal, owner: &Expr) -> Result<Node, CompileError> {
        let value = match lit {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(n) => Value::Int(n),
            Literal::Float(bits) => Value::Float(f64::from_bits(bits)),
            Literal::Str(s) => Value::Str(self.interner.lookup(s).to_owned()),
            Literal::Keyword(k) => Value::Keyword(self.interner.lookup(k).to_owned()),
        };
        let leaf = self.emit(self.trie.make_leaf(value), owner)?;
        let node = self.keyed(tag::LITERAL, vec![(field::VALUE, leaf)]);
        self.emit(node, owner)
    }

    fn variable(&self, name: &str, owner: &Expr) -> Result<Node, CompileError> {
        let leaf = self.emit(self.trie.make_leaf(Value::Symbol(name.to_owned())), owner)?;
        let node = self.keyed(tag::VARIABLE, vec![(field::NAME, leaf)]);
        self.emit(node, owner)
    }

    fn emit(&self, node: Node, owner: &Expr) -> Result<Node, CompileError> {
        self.check(node, || owner.display(self.interner).to_string(), owner.span)
    }

    fn check(
        &self,
        node: Node,
        term: impl FnOnce() -> String,
        span: Span,
    ) -> Result<Node, CompileError> {
        if !self.check_nodes || self.trie.is_node(&node) {
            return Ok(node);
        }
        let tag = node.tag().unwrap_or("leaf").to_owned();
        tracing::error!(tag = %tag, ?span, "node service rejected a compiled node");
        Err(CompileError::InvalidNode {
            tag,
            term: term(),
            output: node.to_string(),
            span,
        })
    }
}
