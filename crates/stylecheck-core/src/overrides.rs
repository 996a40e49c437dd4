//! Syntactic override detection.
//!
//! Only explicit markers are recognized: a method is overriding when it
//! carries `@Override` (or `@java.lang.Override`). Methods without a marker
//! are not overriding; supertypes are never consulted.

use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Annotation names accepted as override markers.
pub const OVERRIDE_MARKERS: &[&str] = &["Override", "java.lang.Override"];

/// Returns `true` if `method` is a method carrying an override marker.
///
/// Constructors, non-method nodes and ids outside `tree` are never
/// overriding.
#[must_use]
pub fn is_overridden(tree: &SyntaxTree, method: NodeId) -> bool {
    let Some(node) = tree.get(method) else {
        return false;
    };
    node.kind == NodeKind::Method
        && node
            .modifiers
            .annotations
            .iter()
            .any(|a| OVERRIDE_MARKERS.contains(&a.name.trim()))
}

/// Returns the method or constructor that directly declares `parameter`.
#[must_use]
pub fn enclosing_method(tree: &SyntaxTree, parameter: NodeId) -> Option<NodeId> {
    let parent = tree.parent(parameter)?;
    let node = tree.get(parent)?;
    matches!(node.kind, NodeKind::Method | NodeKind::Constructor).then_some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Annotation, Modifiers, NewNode, ParamKind, Position, TreeBuilder, TypeKind};

    fn at(line: usize) -> Position {
        Position::new(line, 5)
    }

    fn marked(name: &str, line: usize) -> Modifiers {
        Modifiers::new().with_annotation(Annotation::new(name, at(line)))
    }

    #[test]
    fn override_marker_is_detected() {
        let mut b = TreeBuilder::new("A.java");
        let root = b.root();
        let class = b
            .push(root, NewNode::new(NodeKind::Type(TypeKind::Class), "A", at(1)))
            .unwrap();
        let plain = b
            .push(class, NewNode::new(NodeKind::Method, "plain", at(2)))
            .unwrap();
        let short = b
            .push(
                class,
                NewNode::new(NodeKind::Method, "equals", at(4)).modifiers(marked("Override", 3)),
            )
            .unwrap();
        let qualified = b
            .push(
                class,
                NewNode::new(NodeKind::Method, "hashCode", at(6))
                    .modifiers(marked("java.lang.Override", 5)),
            )
            .unwrap();
        let other = b
            .push(
                class,
                NewNode::new(NodeKind::Method, "old", at(8)).modifiers(marked("Deprecated", 7)),
            )
            .unwrap();
        let tree = b.build();

        assert!(!is_overridden(&tree, plain));
        assert!(is_overridden(&tree, short));
        assert!(is_overridden(&tree, qualified));
        assert!(!is_overridden(&tree, other));
    }

    #[test]
    fn constructors_are_never_overriding() {
        let mut b = TreeBuilder::new("A.java");
        let root = b.root();
        let ctor = b
            .push(
                root,
                NewNode::new(NodeKind::Constructor, "A", at(2)).modifiers(marked("Override", 1)),
            )
            .unwrap();
        let tree = b.build();

        assert!(!is_overridden(&tree, ctor));
    }

    #[test]
    fn minimal_trees_do_not_fail() {
        // method directly under the root: no class, no siblings
        let mut b = TreeBuilder::new("A.java");
        let root = b.root();
        let method = b
            .push(root, NewNode::new(NodeKind::Method, "lonely", at(1)))
            .unwrap();
        let p = b
            .push(
                method,
                NewNode::new(NodeKind::Parameter(ParamKind::Formal), "x", at(1)),
            )
            .unwrap();
        let tree = b.build();

        assert!(!is_overridden(&tree, method));
        assert!(!is_overridden(&tree, tree.root()));
        assert_eq!(enclosing_method(&tree, p), Some(method));
        assert_eq!(enclosing_method(&tree, tree.root()), None);
    }

    #[test]
    fn lambda_parameter_has_no_enclosing_method() {
        let mut b = TreeBuilder::new("A.java");
        let root = b.root();
        let lambda = b
            .push(root, NewNode::new(NodeKind::Lambda, "lambda", at(1)))
            .unwrap();
        let p = b
            .push(
                lambda,
                NewNode::new(NodeKind::Parameter(ParamKind::Lambda), "e", at(1)),
            )
            .unwrap();
        let tree = b.build();

        assert_eq!(enclosing_method(&tree, p), None);
    }
}
