//! # stylecheck-java
//!
//! Tree-sitter based Java frontend for stylecheck.
//!
//! [`JavaParser`] implements [`stylecheck_core::SourceParser`]: it parses
//! Java source with `tree-sitter-java` and lowers the concrete syntax tree
//! into the language-neutral [`stylecheck_core::SyntaxTree`] the checks
//! run on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
mod parser;

pub use parser::JavaParser;
