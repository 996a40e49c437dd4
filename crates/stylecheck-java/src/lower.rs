//! Lowering of tree-sitter Java syntax into the core syntax tree.
//!
//! Only declarations survive: types, anonymous class bodies, methods,
//! constructors, fields, lambdas and parameters. Every other node is
//! flattened into the nearest lowered ancestor.

use stylecheck_core::utils::LineIndex;
use stylecheck_core::{
    Annotation, Modifiers, NewNode, NodeId, NodeKind, ParamKind, ParseError, Position, Scope,
    SyntaxTree, TreeBuilder, TypeKind,
};
use tree_sitter::Node;

/// Identifier text of a declaration together with where it starts.
struct Ident {
    text: String,
    position: Position,
    offset: usize,
}

pub(crate) struct Lowering<'s> {
    src: &'s [u8],
    index: &'s LineIndex<'s>,
    builder: TreeBuilder,
}

impl<'s> Lowering<'s> {
    pub(crate) fn new(source: &'s str, index: &'s LineIndex<'s>, unit_name: &str) -> Self {
        Self {
            src: source.as_bytes(),
            index,
            builder: TreeBuilder::new(unit_name),
        }
    }

    /// Lowers the whole program rooted at `root`.
    ///
    /// Traversal uses an explicit stack, so deeply nested sources cannot
    /// exhaust the call stack.
    pub(crate) fn run(mut self, root: Node<'_>) -> Result<SyntaxTree, ParseError> {
        let mut stack = vec![(root, self.builder.root())];
        while let Some((node, parent)) = stack.pop() {
            let mut next = Vec::new();
            self.lower(node, parent, &mut next)?;
            stack.extend(next.into_iter().rev());
        }
        Ok(self.builder.build())
    }

    fn lower<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        match node.kind() {
            "class_declaration" => self.type_decl(node, parent, TypeKind::Class, next),
            "interface_declaration" => self.type_decl(node, parent, TypeKind::Interface, next),
            "enum_declaration" => self.type_decl(node, parent, TypeKind::Enum, next),
            "annotation_type_declaration" => {
                self.type_decl(node, parent, TypeKind::Annotation, next)
            }
            "record_declaration" => self.type_decl(node, parent, TypeKind::Record, next),
            "method_declaration" => self.callable(node, parent, NodeKind::Method, next),
            "constructor_declaration" | "compact_constructor_declaration" => {
                self.callable(node, parent, NodeKind::Constructor, next)
            }
            "field_declaration" | "constant_declaration" => self.field(node, parent, next),
            "object_creation_expression" => self.object_creation(node, parent, next),
            "enum_constant" => self.enum_constant(node, parent, next),
            "catch_clause" => self.catch_clause(node, parent, next),
            "lambda_expression" => self.lambda(node, parent, next),
            _ => {
                descend(node, parent, next, &[]);
                Ok(())
            }
        }
    }

    fn type_decl<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        kind: TypeKind,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let Some(ident) = self.field_ident(node, "name") else {
            descend(node, parent, next, &[]);
            return Ok(());
        };
        let modifiers = self.modifiers(node);
        let id = self.push(parent, NodeKind::Type(kind), ident, modifiers)?;
        // Record components are not parameters.
        descend(node, id, next, &["modifiers", "formal_parameters"]);
        Ok(())
    }

    fn callable<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        kind: NodeKind,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let Some(ident) = self.field_ident(node, "name") else {
            descend(node, parent, next, &[]);
            return Ok(());
        };
        let modifiers = self.modifiers(node);
        let id = self.push(parent, kind, ident, modifiers)?;
        if let Some(params) = node.child_by_field_name("parameters") {
            self.formal_parameters(params, id, ParamKind::Formal)?;
        }
        descend(node, id, next, &["modifiers", "formal_parameters"]);
        Ok(())
    }

    fn formal_parameters(
        &mut self,
        params: Node<'_>,
        owner: NodeId,
        kind: ParamKind,
    ) -> Result<(), ParseError> {
        for param in named_children(params) {
            match param.kind() {
                "formal_parameter" => {
                    if let Some(ident) = self.field_ident(param, "name") {
                        let modifiers = self.modifiers(param);
                        self.push(owner, NodeKind::Parameter(kind), ident, modifiers)?;
                    }
                }
                "spread_parameter" => {
                    let declarator = named_children(param)
                        .into_iter()
                        .find(|c| c.kind() == "variable_declarator");
                    if let Some(ident) = declarator.and_then(|d| self.field_ident(d, "name")) {
                        let modifiers = self.modifiers(param);
                        self.push(owner, NodeKind::Parameter(kind), ident, modifiers)?;
                    }
                }
                "receiver_parameter" => {
                    let this = children(param)
                        .into_iter()
                        .find(|c| c.kind() == "this")
                        .unwrap_or(param);
                    let ident = self.ident_at(this, "this");
                    self.push(
                        owner,
                        NodeKind::Parameter(ParamKind::Receiver),
                        ident,
                        Modifiers::default(),
                    )?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn field<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let ident = node
            .child_by_field_name("declarator")
            .and_then(|d| self.field_ident(d, "name"));
        let Some(ident) = ident else {
            descend(node, parent, next, &[]);
            return Ok(());
        };
        let modifiers = self.modifiers(node);
        let id = self.push(parent, NodeKind::Field, ident, modifiers)?;
        descend(node, id, next, &["modifiers"]);
        Ok(())
    }

    fn object_creation<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let body = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "class_body");
        let Some(body) = body else {
            descend(node, parent, next, &[]);
            return Ok(());
        };
        let type_node = node.child_by_field_name("type").unwrap_or(node);
        let ident = self.ident_at(type_node, "<anonymous>");
        let id = self.push(
            parent,
            NodeKind::AnonymousClass,
            ident,
            Modifiers::default(),
        )?;
        descend(node, parent, next, &["class_body"]);
        descend(body, id, next, &[]);
        Ok(())
    }

    fn enum_constant<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let body = node.child_by_field_name("body");
        let ident = self.field_ident(node, "name");
        let (Some(body), Some(ident)) = (body, ident) else {
            descend(node, parent, next, &[]);
            return Ok(());
        };
        let id = self.push(
            parent,
            NodeKind::AnonymousClass,
            ident,
            Modifiers::default(),
        )?;
        descend(node, parent, next, &["class_body"]);
        descend(body, id, next, &[]);
        Ok(())
    }

    fn catch_clause<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let param = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "catch_formal_parameter");
        if let Some(param) = param {
            if let Some(ident) = self.field_ident(param, "name") {
                let modifiers = self.modifiers(param);
                self.push(
                    parent,
                    NodeKind::Parameter(ParamKind::Catch),
                    ident,
                    modifiers,
                )?;
            }
        }
        descend(node, parent, next, &["catch_formal_parameter"]);
        Ok(())
    }

    fn lambda<'t>(
        &mut self,
        node: Node<'t>,
        parent: NodeId,
        next: &mut Vec<(Node<'t>, NodeId)>,
    ) -> Result<(), ParseError> {
        let ident = Ident {
            text: "->".to_string(),
            position: self.position(node),
            offset: node.start_byte(),
        };
        let id = self.push(parent, NodeKind::Lambda, ident, Modifiers::default())?;

        if let Some(params) = node.child_by_field_name("parameters") {
            match params.kind() {
                "identifier" => self.lambda_parameter(params, id)?,
                "inferred_parameters" => {
                    for param in named_children(params) {
                        if param.kind() == "identifier" {
                            self.lambda_parameter(param, id)?;
                        }
                    }
                }
                "formal_parameters" => self.formal_parameters(params, id, ParamKind::Lambda)?,
                _ => {}
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            next.push((body, id));
        }
        Ok(())
    }

    fn lambda_parameter(&mut self, name: Node<'_>, owner: NodeId) -> Result<(), ParseError> {
        let ident = self.ident_at(name, "");
        if ident.text.is_empty() {
            return Ok(());
        }
        self.push(
            owner,
            NodeKind::Parameter(ParamKind::Lambda),
            ident,
            Modifiers::default(),
        )?;
        Ok(())
    }

    /// Collects visibility and annotations from the `modifiers`
    /// child of a declaration.
    fn modifiers(&self, decl: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        let Some(list) = children(decl)
            .into_iter()
            .find(|c| c.kind() == "modifiers")
        else {
            return modifiers;
        };

        for item in children(list) {
            match item.kind() {
                "public" => modifiers.visibility = Some(Scope::Public),
                "protected" => modifiers.visibility = Some(Scope::Protected),
                "private" => modifiers.visibility = Some(Scope::Private),
                "marker_annotation" | "annotation" => {
                    if let Some(name) = item.child_by_field_name("name") {
                        let name = self.text(name);
                        if !name.is_empty() {
                            let position = self.position(item);
                            modifiers.annotations.push(Annotation::new(name, position));
                        }
                    }
                }
                _ => {}
            }
        }
        modifiers
    }

    fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        ident: Ident,
        modifiers: Modifiers,
    ) -> Result<NodeId, ParseError> {
        let id = self.builder.push(
            parent,
            NewNode::new(kind, ident.text, ident.position)
                .offset(ident.offset)
                .modifiers(modifiers),
        )?;
        Ok(id)
    }

    fn field_ident(&self, node: Node<'_>, field: &str) -> Option<Ident> {
        let name = node.child_by_field_name(field)?;
        let ident = self.ident_at(name, "");
        (!ident.text.is_empty()).then_some(ident)
    }

    /// Identifier located at `node`, using `fallback` when its text is empty.
    fn ident_at(&self, node: Node<'_>, fallback: &str) -> Ident {
        let text = self.text(node);
        Ident {
            text: if text.is_empty() { fallback } else { text }.to_string(),
            position: self.position(node),
            offset: node.start_byte(),
        }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("").trim()
    }

    fn position(&self, node: Node<'_>) -> Position {
        let (line, column) = self.index.position(node.start_byte());
        Position::new(line, column)
    }
}

/// Queues the named children of `node` under `parent`, skipping the kinds
/// listed in `skip`.
fn descend<'t>(
    node: Node<'t>,
    parent: NodeId,
    next: &mut Vec<(Node<'t>, NodeId)>,
    skip: &[&str],
) {
    next.extend(
        named_children(node)
            .into_iter()
            .filter(|c| !skip.contains(&c.kind()))
            .map(|c| (c, parent)),
    );
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}
