//! Java source parser using Tree-sitter.

use stylecheck_core::utils::LineIndex;
use stylecheck_core::{ParseError, SourceParser, SyntaxTree};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::lower::Lowering;

/// Parses Java source into the core syntax tree.
pub struct JavaParser {
    language: Language,
}

impl JavaParser {
    /// Creates a new Java parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaParser {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(
        &self,
        unit_name: &str,
        source: &str,
        tab_width: usize,
    ) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or(ParseError::Incomplete)?;
        let root = tree.root_node();
        let index = LineIndex::new(source, tab_width);

        if root.has_error() {
            return Err(first_error(root, source, &index));
        }

        let lowered = Lowering::new(source, &index, unit_name).run(root)?;
        debug!("Lowered {} into {} nodes", unit_name, lowered.len());
        Ok(lowered)
    }
}

/// Builds a syntax error for the first erroneous node in source order.
fn first_error(root: Node<'_>, source: &str, index: &LineIndex<'_>) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() || node.is_error() {
            let (line, column) = index.position(node.start_byte());
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                let snippet = node
                    .utf8_text(source.as_bytes())
                    .unwrap_or("")
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim();
                format!("unexpected '{snippet}'")
            };
            return ParseError::Syntax {
                line,
                column,
                message,
            };
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(|c| c.has_error() || c.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }

    let (line, column) = index.position(root.start_byte());
    ParseError::Syntax {
        line,
        column,
        message: "invalid syntax".to_string(),
    }
}
