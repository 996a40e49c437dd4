//! # stylecheck-core
//!
//! Core framework for source style checking over a language-neutral
//! syntax tree.
//!
//! This crate provides the foundational traits and types for building
//! style checks. It includes:
//!
//! - [`SyntaxTree`] arena with parent links stored as indices
//! - [`Scope`] and [`resolve_scope`] for effective declaration visibility
//! - [`is_overridden`] for syntactic override detection
//! - [`Check`] trait and the [`TreeWalker`] that dispatches nodes by [`TokenType`]
//! - [`Analyzer`] for orchestrating parallel runs over a directory
//! - [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use stylecheck_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaParser::new())
//!     .check(MyCheck::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod check;
mod config;
mod context;
mod overrides;
mod parser;
mod scope;
mod scope_resolver;
mod token;
mod tree;
mod types;
mod walker;

/// Message catalog for violation texts.
pub mod messages;

/// Utility modules for parsers and checks.
pub mod utils;

pub use analyzer::{
    parse_error_violation, read_error_violation, Analyzer, AnalyzerBuilder, AnalyzerError,
    PARSE_ERROR_CHECK, PARSE_ERROR_CODE,
};
pub use check::{Check, CheckBox};
pub use config::{CheckConfig, CheckerConfig, Config, ConfigError};
pub use context::CheckContext;
pub use overrides::{enclosing_method, is_overridden, OVERRIDE_MARKERS};
pub use parser::{ParseError, SourceParser};
pub use scope::{Scope, ScopeFilter, UnknownScope};
pub use scope_resolver::resolve_scope;
pub use token::{TokenType, UnknownToken};
pub use tree::{
    Ancestors, Annotation, Modifiers, NewNode, NodeId, NodeKind, ParamKind, Position, Preorder,
    SyntaxNode, SyntaxTree, TreeBuilder, TreeError, TypeKind,
};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
pub use walker::{CheckRegistration, TreeWalker, TreeWalkerBuilder, WalkerError};
