//! Environment boundary.
//!
//! Top-level procedures close over the scope of the namespace they are
//! compiled in. The compiler only asks for a handle and stores it; what a
//! scope contains is the environment's business.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Name of a namespace, e.g. `user`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Namespace(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::new("user")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque, shared reference to a scope owned by the environment.
///
/// Handles compare by identity: two handles are equal when they point at
/// the same scope.
#[derive(Clone)]
pub struct ScopeHandle(Arc<dyn Any + Send + Sync>);

impl ScopeHandle {
    pub fn new<T: Any + Send + Sync>(scope: T) -> Self {
        ScopeHandle(Arc::new(scope))
    }

    /// View the scope as the environment's concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &ScopeHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ScopeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ScopeHandle {}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeHandle({:p})", Arc::as_ptr(&self.0))
    }
}

/// Resolves the scope top-level procedures capture.
pub trait Environment {
    fn resolve_top_level_scope(&self, namespace: &Namespace) -> ScopeHandle;
}

/// Scope payload handed out by [`NamespaceTable`].
#[derive(Debug)]
pub struct NamespaceScope {
    pub namespace: Namespace,
}

/// Environment with one scope per namespace, created on first request.
#[derive(Default)]
pub struct NamespaceTable {
    scopes: Mutex<FxHashMap<Namespace, ScopeHandle>>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        NamespaceTable::default()
    }

    /// Number of namespaces resolved so far.
    pub fn len(&self) -> usize {
        self.scopes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Environment for NamespaceTable {
    fn resolve_top_level_scope(&self, namespace: &Namespace) -> ScopeHandle {
        self.scopes
            .lock()
            .entry(namespace.clone())
            .or_insert_with(|| {
                tracing::debug!(%namespace, "creating namespace scope");
                ScopeHandle::new(NamespaceScope {
                    namespace: namespace.clone(),
                })
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_scope_per_namespace() {
        let env = NamespaceTable::new();
        let user = Namespace::default();
        let first = env.resolve_top_level_scope(&user);
        let again = env.resolve_top_level_scope(&user);
        let other = env.resolve_top_level_scope(&Namespace::new("models"));
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn handle_exposes_the_scope() {
        let env = NamespaceTable::new();
        let handle = env.resolve_top_level_scope(&Namespace::new("models"));
        let scope = handle.downcast_ref::<NamespaceScope>();
        assert_eq!(scope.map(|s| s.namespace.as_str()), Some("models"));
        assert!(handle.downcast_ref::<String>().is_none());
    }
}
