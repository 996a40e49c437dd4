//! Check that method and constructor parameter names follow a pattern.
//!
//! # Skipped Parameters
//!
//! - Exception variables of `catch` clauses
//! - Explicit `this` receiver parameters
//! - Lambda parameters
//! - Parameters outside the configured scope range
//! - Parameters of `@Override` methods, when `ignoreOverridden` is set
//!
//! # Configuration
//!
//! - `format`: pattern the whole name must match (default: `^[a-z][a-zA-Z0-9]*$`)
//! - `scope`: least visible scope still checked (default: every scope)
//! - `excludeScope`: scope that, along with every more visible one, is never checked
//! - `ignoreOverridden`: skip parameters of overriding methods (default: false)

use super::NamingConfig;
use stylecheck_core::messages::MSG_INVALID_PATTERN;
use stylecheck_core::{
    Check, CheckConfig, CheckContext, ConfigError, NodeId, NodeKind, ParamKind, Scope, Severity,
    TokenType, Violation,
};
use tracing::trace;

/// Check code for parameter-name.
pub const CODE: &str = "SC101";

/// Check name for parameter-name.
pub const NAME: &str = "parameter-name";

/// Default parameter name pattern.
pub const DEFAULT_FORMAT: &str = "^[a-z][a-zA-Z0-9]*$";

const TOKENS: &[TokenType] = &[TokenType::ParameterDef];

/// Checks parameter names against a pattern.
#[derive(Debug, Clone)]
pub struct ParameterName {
    config: NamingConfig,
    severity: Severity,
}

impl ParameterName {
    /// Creates a new check with the default pattern and no restrictions.
    ///
    /// # Errors
    ///
    /// Returns an error if the default pattern does not compile.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(&CheckConfig::new())
    }

    /// Creates a check from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid pattern, an unknown scope name, or
    /// an option of the wrong type.
    pub fn from_config(section: &CheckConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: NamingConfig::from_config(section, DEFAULT_FORMAT)?,
            severity: Severity::Error,
        })
    }

    /// Sets the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `format` does not compile.
    pub fn format(mut self, format: &str) -> Result<Self, ConfigError> {
        self.config.pattern = super::NamePattern::new(format)?;
        Ok(self)
    }

    /// Only checks parameters whose scope is `scope` or more visible.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.config.filter = self.config.filter.scope(scope);
        self
    }

    /// Never checks parameters whose scope is `scope` or more visible.
    #[must_use]
    pub fn exclude_scope(mut self, scope: Scope) -> Self {
        self.config.filter = self.config.filter.exclude_scope(scope);
        self
    }

    /// Sets whether parameters of overriding methods are skipped.
    #[must_use]
    pub fn ignore_overridden(mut self, ignore: bool) -> Self {
        self.config.ignore_overridden = ignore;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }
}

impl Check for ParameterName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks that parameter names match a pattern"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn acceptable_tokens(&self) -> &'static [TokenType] {
        TOKENS
    }

    fn required_tokens(&self) -> &'static [TokenType] {
        TOKENS
    }

    fn evaluate(&self, ctx: &CheckContext<'_>, node: NodeId) -> Option<Violation> {
        let param = ctx.node(node)?;
        let NodeKind::Parameter(ParamKind::Formal) = param.kind else {
            return None;
        };

        let scope = ctx.scope_of(node);
        if !self.config.in_scope(scope) {
            trace!("{}: skipping '{}' in {} scope", NAME, param.ident, scope);
            return None;
        }
        if self.config.ignore_overridden && ctx.in_overriding_method(node) {
            trace!("{}: skipping '{}' of overriding method", NAME, param.ident);
            return None;
        }
        if self.config.pattern.matches(&param.ident) {
            return None;
        }

        Some(Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(param),
            MSG_INVALID_PATTERN,
            vec![param.ident.clone(), self.config.pattern.as_str().to_string()],
        ))
    }
}
