//! Arena-backed syntax tree.
//!
//! Frontends lower their parser output into a [`SyntaxTree`] through a
//! [`TreeBuilder`]. Nodes live in a single `Vec`; parent links are plain
//! [`NodeId`] indices, never owning references. A node can only be attached
//! to a parent that already exists, so every parent index is strictly
//! smaller than its child's index and ancestor walks always terminate.

use crate::scope::Scope;
use crate::token::TokenType;
use std::fmt;
use thiserror::Error;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Source position of a node's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, tabs expanded).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `@interface`
    Annotation,
    /// `record`
    Record,
}

/// Kind of a parameter declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Method or constructor parameter, including varargs.
    Formal,
    /// Exception variable of a `catch` clause.
    Catch,
    /// Explicit `this` receiver parameter.
    Receiver,
    /// Lambda parameter.
    Lambda,
}

/// Tagged variant over the declaration kinds a tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root node of a source unit.
    CompilationUnit,
    /// Named type declaration.
    Type(TypeKind),
    /// Anonymous class body.
    AnonymousClass,
    /// Method declaration.
    Method,
    /// Constructor declaration.
    Constructor,
    /// Field declaration.
    Field,
    /// Lambda expression.
    Lambda,
    /// Parameter declaration.
    Parameter(ParamKind),
}

impl NodeKind {
    /// Returns the dispatch token for this kind.
    #[must_use]
    pub fn token_type(self) -> TokenType {
        match self {
            Self::CompilationUnit => TokenType::CompilationUnit,
            Self::Type(TypeKind::Class) => TokenType::ClassDef,
            Self::Type(TypeKind::Interface) => TokenType::InterfaceDef,
            Self::Type(TypeKind::Enum) => TokenType::EnumDef,
            Self::Type(TypeKind::Annotation) => TokenType::AnnotationDef,
            Self::Type(TypeKind::Record) => TokenType::RecordDef,
            Self::AnonymousClass => TokenType::AnonymousClass,
            Self::Method => TokenType::MethodDef,
            Self::Constructor => TokenType::CtorDef,
            Self::Field => TokenType::VariableDef,
            Self::Lambda => TokenType::Lambda,
            Self::Parameter(_) => TokenType::ParameterDef,
        }
    }

    /// Returns `true` for declarations that own a visibility: types,
    /// methods, constructors and fields.
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(
            self,
            Self::Type(_) | Self::Method | Self::Constructor | Self::Field
        )
    }
}

/// An annotation attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation name as written, possibly qualified (`java.lang.Override`).
    pub name: String,
    /// Position of the `@` sign.
    pub position: Position,
}

impl Annotation {
    /// Creates a new annotation.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Modifier set of a declaration: the visibility keyword and annotations.
/// Other keywords (`static`, `final`, ...) are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Explicit visibility keyword; `None` means package-default.
    pub visibility: Option<Scope>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
}

impl Modifiers {
    /// Creates an empty modifier set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit visibility keyword.
    #[must_use]
    pub fn with_visibility(mut self, scope: Scope) -> Self {
        self.visibility = Some(scope);
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A single node of the syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Declaration kind.
    pub kind: NodeKind,
    /// Identifier text; never empty.
    pub ident: String,
    /// Position of the identifier.
    pub position: Position,
    /// Byte offset of the identifier in the source text.
    pub offset: usize,
    /// Declared modifiers.
    pub modifiers: Modifiers,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    /// Returns the parent of this node; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children of this node in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the dispatch token of this node.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }
}

/// Description of a node to be attached by [`TreeBuilder::push`].
#[derive(Debug, Clone)]
pub struct NewNode {
    kind: NodeKind,
    ident: String,
    position: Position,
    offset: usize,
    modifiers: Modifiers,
}

impl NewNode {
    /// Creates a node description without modifiers.
    #[must_use]
    pub fn new(kind: NodeKind, ident: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            ident: ident.into(),
            position,
            offset: 0,
            modifiers: Modifiers::default(),
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the identifier's byte offset.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Errors raised while assembling a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node was attached to an id that does not exist in this builder.
    #[error("unknown parent node #{0}")]
    UnknownParent(usize),

    /// A node was created with an empty identifier.
    #[error("empty identifier for {kind:?} at {position}")]
    EmptyIdentifier {
        /// Kind of the offending node.
        kind: NodeKind,
        /// Where the node was declared.
        position: Position,
    },

    /// A second compilation unit was attached below the root.
    #[error("compilation unit nested at {0}")]
    NestedCompilationUnit(Position),
}

/// Incremental builder for a [`SyntaxTree`].
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    /// Creates a builder whose root compilation unit is named `unit_name`.
    #[must_use]
    pub fn new(unit_name: impl Into<String>) -> Self {
        let mut ident = unit_name.into();
        if ident.is_empty() {
            ident = "<unit>".to_string();
        }
        let root = SyntaxNode {
            kind: NodeKind::CompilationUnit,
            ident,
            position: Position::new(1, 1),
            offset: 0,
            modifiers: Modifiers::default(),
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    /// Returns the root id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attaches a new node as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is unknown, the identifier is empty, or
    /// the node is a compilation unit.
    pub fn push(&mut self, parent: NodeId, node: NewNode) -> Result<NodeId, TreeError> {
        if parent.0 >= self.nodes.len() {
            return Err(TreeError::UnknownParent(parent.0));
        }
        if node.kind == NodeKind::CompilationUnit {
            return Err(TreeError::NestedCompilationUnit(node.position));
        }
        if node.ident.is_empty() {
            return Err(TreeError::EmptyIdentifier {
                kind: node.kind,
                position: node.position,
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind: node.kind,
            ident: node.ident,
            position: node.position,
            offset: node.offset,
            modifiers: node.modifiers,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Finishes the tree.
    #[must_use]
    pub fn build(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

/// Immutable syntax tree of one source unit.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Returns the root compilation unit.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node. Ids from another tree may return `None`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }

    /// Returns the parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(SyntaxNode::parent)
    }

    /// Returns the children of `id`, or an empty slice for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[] as &[NodeId], SyntaxNode::children)
    }

    /// Iterates over the strict ancestors of `id`, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Iterates over all nodes in pre-order, starting at the root.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Returns the first node in pre-order whose identifier is `ident`.
    #[must_use]
    pub fn find(&self, ident: &str) -> Option<NodeId> {
        self.preorder()
            .find(|id| self.get(*id).is_some_and(|n| n.ident == ident))
    }
}

/// Iterator over a node's ancestors. See [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator backed by an explicit stack. See [`SyntaxTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    fn sample() -> SyntaxTree {
        let mut b = TreeBuilder::new("Sample.java");
        let class = b
            .push(
                b.root(),
                NewNode::new(NodeKind::Type(TypeKind::Class), "Sample", pos(1, 14)),
            )
            .unwrap();
        let method = b
            .push(class, NewNode::new(NodeKind::Method, "run", pos(2, 17)))
            .unwrap();
        b.push(
            method,
            NewNode::new(NodeKind::Parameter(ParamKind::Formal), "a", pos(2, 25)),
        )
        .unwrap();
        b.push(
            method,
            NewNode::new(NodeKind::Parameter(ParamKind::Formal), "b", pos(2, 32)),
        )
        .unwrap();
        b.push(class, NewNode::new(NodeKind::Field, "count", pos(3, 17)))
            .unwrap();
        b.build()
    }

    #[test]
    fn preorder_visits_children_in_source_order() {
        let tree = sample();
        let idents: Vec<&str> = tree
            .preorder()
            .map(|id| tree.get(id).unwrap().ident.as_str())
            .collect();
        assert_eq!(idents, ["Sample.java", "Sample", "run", "a", "b", "count"]);
    }

    #[test]
    fn ancestors_walk_up_to_root() {
        let tree = sample();
        let b = tree.find("b").unwrap();
        let kinds: Vec<NodeKind> = tree
            .ancestors(b)
            .map(|id| tree.get(id).unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            [
                NodeKind::Method,
                NodeKind::Type(TypeKind::Class),
                NodeKind::CompilationUnit
            ]
        );
    }

    #[test]
    fn root_has_no_ancestors() {
        let tree = sample();
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let mut b = TreeBuilder::new("Empty.java");
        let root = b.root();
        let err = b
            .push(root, NewNode::new(NodeKind::Method, "", pos(4, 2)))
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::EmptyIdentifier {
                kind: NodeKind::Method,
                position: pos(4, 2)
            }
        );
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut b = TreeBuilder::new("Orphan.java");
        let err = b
            .push(NodeId(7), NewNode::new(NodeKind::Field, "x", pos(1, 1)))
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownParent(7));
    }

    #[test]
    fn nested_compilation_unit_is_rejected() {
        let mut b = TreeBuilder::new("Nested.java");
        let root = b.root();
        assert!(b
            .push(
                root,
                NewNode::new(NodeKind::CompilationUnit, "Inner", pos(1, 1))
            )
            .is_err());
    }

    #[test]
    fn empty_unit_name_gets_placeholder() {
        let tree = TreeBuilder::new("").build();
        assert_eq!(tree.get(tree.root()).unwrap().ident, "<unit>");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn foreign_ids_are_tolerated() {
        let tree = sample();
        let foreign = NodeId(999);
        assert!(tree.get(foreign).is_none());
        assert!(tree.children(foreign).is_empty());
        assert_eq!(tree.ancestors(foreign).count(), 0);
    }

    #[test]
    fn parameters_dispatch_as_parameter_def() {
        for kind in [
            ParamKind::Formal,
            ParamKind::Catch,
            ParamKind::Receiver,
            ParamKind::Lambda,
        ] {
            assert_eq!(
                NodeKind::Parameter(kind).token_type(),
                TokenType::ParameterDef
            );
        }
    }
}
