//! Utility functions shared by parsers and checks.

pub mod text;

#[doc(inline)]
pub use text::{expanded_column, LineIndex, DEFAULT_TAB_WIDTH};
