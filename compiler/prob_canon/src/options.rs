//! Compilation settings.

use crate::Namespace;

/// Settings for [`Compiler`](crate::Compiler).
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Namespace whose scope top-level procedures capture.
    pub namespace: Namespace,
    /// Check every emitted node with `TrieService::is_node`.
    pub check_nodes: bool,
    /// Keep style warnings on the compiled forms. They are logged either way.
    pub collect_warnings: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            namespace: Namespace::default(),
            check_nodes: true,
            collect_warnings: true,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    #[must_use]
    pub fn with_node_check(mut self, check_nodes: bool) -> Self {
        self.check_nodes = check_nodes;
        self
    }

    #[must_use]
    pub fn with_warnings(mut self, collect_warnings: bool) -> Self {
        self.collect_warnings = collect_warnings;
        self
    }
}
