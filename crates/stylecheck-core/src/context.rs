//! Context types for check execution.

use crate::overrides;
use crate::scope::Scope;
use crate::scope_resolver::resolve_scope;
use crate::tree::{NodeId, SyntaxNode, SyntaxTree};
use crate::types::Location;
use std::path::Path;

/// Context provided to checks for one source unit.
///
/// Holds only shared references, so one context can be handed to every
/// check of a run without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Path of the file, relative to the checked root.
    pub path: &'a Path,
    /// Syntax tree of the file.
    pub tree: &'a SyntaxTree,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    #[must_use]
    pub fn new(path: &'a Path, tree: &'a SyntaxTree) -> Self {
        Self { path, tree }
    }

    /// Looks up a node of this context's tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        self.tree.get(id)
    }

    /// Resolves the effective scope of `id`.
    #[must_use]
    pub fn scope_of(&self, id: NodeId) -> Scope {
        resolve_scope(self.tree, id)
    }

    /// Returns `true` if `id` is the parameter of a method carrying an
    /// override marker.
    #[must_use]
    pub fn in_overriding_method(&self, id: NodeId) -> bool {
        overrides::enclosing_method(self.tree, id)
            .is_some_and(|method| overrides::is_overridden(self.tree, method))
    }

    /// Builds the location of a node's identifier.
    #[must_use]
    pub fn location(&self, node: &SyntaxNode) -> Location {
        Location::new(
            self.path.to_path_buf(),
            node.position.line,
            node.position.column,
        )
        .with_span(node.offset, node.ident.len())
    }
}
