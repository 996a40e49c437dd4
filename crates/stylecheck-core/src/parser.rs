//! Source parser trait.
//!
//! `SourceParser` is the extension point for adding new languages. Implement
//! it to lower raw source text into a [`SyntaxTree`].

use crate::tree::{SyntaxTree, TreeError};
use thiserror::Error;

/// Errors produced while parsing a source unit.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed, tabs expanded).
        column: usize,
        /// Description of the error.
        message: String,
    },

    /// The grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parser produced no tree")]
    Incomplete,

    /// The lowered tree was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Position of the error, when known.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Trait for language frontends.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"java"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["java"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a syntax tree named `unit_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(
        &self,
        unit_name: &str,
        source: &str,
        tab_width: usize,
    ) -> Result<SyntaxTree, ParseError>;
}
