//! Top-level compilation.
//!
//! A top-level form is compiled twice over: desugared to the core calculus
//! and compiled to its trace tree. Function-valued forms, `(program ...)`
//! and `(define name (program ...))`, additionally become a [`Procedure`]
//! carrying an identity key and the scope of the compiling namespace.

use prob_diagnostic::Diagnostic;
use prob_ir::{Core, Expr, ExprKind, Name, Pattern, StringInterner};
use prob_parse::parse_source;
use prob_trie::{Node, TrieService};

use crate::desugar::Desugarer;
use crate::lower::TrieCompiler;
use crate::{CompileError, CompileOptions, Environment, IdentityKey, ScopeHandle};

/// A compiled top-level function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Procedure {
    /// Bound name, `None` for an anonymous `(program ...)`.
    pub name: Option<Name>,
    /// The `program` subtree.
    pub body: Node,
    pub identity: IdentityKey,
    pub scope: ScopeHandle,
}

/// One compiled top-level form.
#[derive(Clone, Debug)]
pub struct CompiledForm {
    pub tree: Node,
    pub core: Core,
    pub procedure: Option<Procedure>,
    pub warnings: Vec<Diagnostic>,
}

/// Every top-level form of a source text, in order.
#[derive(Clone, Debug, Default)]
pub struct CompiledModule {
    pub forms: Vec<CompiledForm>,
}

impl CompiledModule {
    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.forms.iter().filter_map(|form| form.procedure.as_ref())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.forms.iter().flat_map(|form| form.warnings.iter())
    }
}

/// Front-end compiler over a trie service and an environment.
pub struct Compiler<'a> {
    interner: &'a StringInterner,
    trie: &'a dyn TrieService,
    env: &'a dyn Environment,
    options: CompileOptions,
}

impl<'a> Compiler<'a> {
    pub fn new(
        interner: &'a StringInterner,
        trie: &'a dyn TrieService,
        env: &'a dyn Environment,
        options: CompileOptions,
    ) -> Self {
        Compiler {
            interner,
            trie,
            env,
            options,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one expression to its trace tree.
    pub fn compile_expr(&self, expr: &Expr) -> Result<Node, CompileError> {
        let tree = TrieCompiler::new(self.trie, self.interner)
            .with_node_check(self.options.check_nodes)
            .compile_expr(expr)?;
        #[cfg(debug_assertions)]
        crate::validate(&tree);
        Ok(tree)
    }

    /// Desugar one expression to the core calculus.
    pub fn desugar(&self, expr: &Expr) -> (Core, Vec<Diagnostic>) {
        let mut desugarer = Desugarer::new(self.interner);
        let core = desugarer.desugar_expr(expr);
        (core, desugarer.into_warnings())
    }

    /// Compile a top-level form.
    pub fn compile_top_level(&self, expr: &Expr) -> Result<CompiledForm, CompileError> {
        tracing::debug!(span = ?expr.span, "compiling top-level form");
        let tree = self.compile_expr(expr)?;
        let (core, mut warnings) = self.desugar(expr);
        if !self.options.collect_warnings {
            warnings.clear();
        }
        let procedure = self.procedure(expr, &tree);
        Ok(CompiledForm {
            tree,
            core,
            procedure,
            warnings,
        })
    }

    /// Read and compile every top-level form of `source`.
    pub fn compile_source(&self, source: &str) -> Result<CompiledModule, CompileError> {
        let exprs = parse_source(source, self.interner)?;
        let forms = exprs
            .iter()
            .map(|expr| self.compile_top_level(expr))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(forms = forms.len(), "compiled source");
        Ok(CompiledModule { forms })
    }

    fn procedure(&self, expr: &Expr, tree: &Node) -> Option<Procedure> {
        let (name, body) = match &expr.kind {
            ExprKind::Program { .. } => (None, tree.clone()),
            ExprKind::Define {
                pattern: Pattern::Name(name),
                value,
            } if value.is_program() => {
                let body = tree.field(self.interner.lookup(*name))?.clone();
                (Some(*name), body)
            }
            _ => return None,
        };
        let identity = IdentityKey::of(&body);
        let scope = self.env.resolve_top_level_scope(&self.options.namespace);
        tracing::debug!(
            name = ?name.map(|n| self.interner.lookup(n)),
            %identity,
            "compiled procedure"
        );
        Some(Procedure {
            name,
            body,
            identity,
            scope,
        })
    }
}
