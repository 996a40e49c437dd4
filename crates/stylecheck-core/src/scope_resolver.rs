//! Effective visibility of declarations.
//!
//! The effective scope of a declaration is the least visible scope found
//! along its chain of enclosing types: a `public` method of a
//! package-private class is not publicly reachable. Anything inside an
//! anonymous class body is [`Scope::AnonInner`].

use crate::scope::Scope;
use crate::tree::{NodeId, NodeKind, SyntaxTree, TypeKind};

/// Resolves the effective scope of `id`.
///
/// Parameters take the scope of their owning member. Declarations without
/// an owning member, and ids that are not part of `tree`, resolve to
/// [`Scope::Private`].
#[must_use]
pub fn resolve_scope(tree: &SyntaxTree, id: NodeId) -> Scope {
    let Some(member) = owning_member(tree, id) else {
        return Scope::Private;
    };
    let declared = declared_scope(tree, member);
    match surrounding_scope(tree, member) {
        Some(surrounding) => declared.least_visible(surrounding),
        None => declared,
    }
}

/// Returns `id` itself if it is a member, otherwise its nearest enclosing member.
fn owning_member(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .find(|candidate| tree.get(*candidate).is_some_and(|n| n.kind.is_member()))
}

/// Scope a member declares for itself, implicit visibility included.
fn declared_scope(tree: &SyntaxTree, member: NodeId) -> Scope {
    let Some(node) = tree.get(member) else {
        return Scope::Private;
    };
    let container = enclosing_body(tree, member);

    if let Some(explicit) = node.modifiers.visibility {
        return explicit;
    }
    match container {
        Some(NodeKind::Type(TypeKind::Interface | TypeKind::Annotation)) => Scope::Public,
        Some(NodeKind::Type(TypeKind::Enum)) if node.kind == NodeKind::Constructor => {
            Scope::Private
        }
        _ => Scope::Package,
    }
}

/// Kind of the type body that directly contains `member`, if any.
fn enclosing_body(tree: &SyntaxTree, member: NodeId) -> Option<NodeKind> {
    let parent = tree.get(tree.parent(member)?)?;
    match parent.kind {
        kind @ (NodeKind::Type(_) | NodeKind::AnonymousClass) => Some(kind),
        _ => None,
    }
}

/// Least visible scope among the types enclosing `member`.
///
/// Returns `None` for top-level declarations.
fn surrounding_scope(tree: &SyntaxTree, member: NodeId) -> Option<Scope> {
    let mut result: Option<Scope> = None;
    for ancestor in tree.ancestors(member) {
        let Some(node) = tree.get(ancestor) else {
            return Some(Scope::Private);
        };
        match node.kind {
            NodeKind::AnonymousClass => return Some(Scope::AnonInner),
            NodeKind::Type(_) => {
                let scope = declared_scope(tree, ancestor);
                result = Some(result.map_or(scope, |r| r.least_visible(scope)));
            }
            _ => {}
        }
    }
    result
}
