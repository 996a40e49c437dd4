//! # stylecheck-checks
//!
//! Built-in style checks for stylecheck.
//!
//! ## Available Checks
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SC101 | `parameter-name` | Parameter names must match a pattern |
//!
//! ## Usage
//!
//! ```ignore
//! use stylecheck_core::{Analyzer, Scope};
//! use stylecheck_checks::ParameterName;
//! use stylecheck_java::JavaParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaParser::new())
//!     .check(ParameterName::new()?.scope(Scope::Protected))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod naming;
mod presets;
mod registry;

pub use naming::{NamePattern, NamingConfig, ParameterName};
pub use presets::{merge_sections, Preset};
pub use registry::{
    available_checks, build_check, registrations_from_config, CheckInfo, OPT_TOKENS,
};

/// Re-export core types for convenience.
pub use stylecheck_core::{Check, Severity, Violation};
