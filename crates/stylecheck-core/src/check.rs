//! Check trait for defining style checks.

use crate::context::CheckContext;
use crate::token::TokenType;
use crate::tree::NodeId;
use crate::types::{Severity, Violation};

/// A style check evaluated node by node.
///
/// Checks declare which token types they can process; the
/// [`TreeWalker`](crate::TreeWalker) only hands them nodes of those types.
/// A check holds nothing but immutable configuration, so one instance can
/// serve many files in parallel.
///
/// # Example
///
/// ```ignore
/// use stylecheck_core::{Check, CheckContext, NodeId, TokenType, Violation};
///
/// pub struct NoEmptyNames;
///
/// impl Check for NoEmptyNames {
///     fn name(&self) -> &'static str { "no-empty-names" }
///     fn code(&self) -> &'static str { "SC900" }
///     fn acceptable_tokens(&self) -> &'static [TokenType] { &[TokenType::MethodDef] }
///     fn required_tokens(&self) -> &'static [TokenType] { &[] }
///
///     fn evaluate(&self, ctx: &CheckContext<'_>, node: NodeId) -> Option<Violation> {
///         None
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "parameter-name").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "SC101").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check verifies.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity of violations from this check.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Token types this check is able to process.
    fn acceptable_tokens(&self) -> &'static [TokenType];

    /// Token types visited when no explicit token list is configured.
    fn default_tokens(&self) -> &'static [TokenType] {
        self.acceptable_tokens()
    }

    /// Token types that are always visited, whatever the configuration says.
    fn required_tokens(&self) -> &'static [TokenType];

    /// Evaluates a single node and returns at most one violation.
    ///
    /// Must not panic for any tree built through
    /// [`TreeBuilder`](crate::TreeBuilder), however incomplete its context.
    fn evaluate(&self, ctx: &CheckContext<'_>, node: NodeId) -> Option<Violation>;
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;
