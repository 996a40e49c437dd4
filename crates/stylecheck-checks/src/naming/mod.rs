//! Naming checks.
//!
//! Every naming check shares [`NamingConfig`]: a pattern the identifier
//! must fully match, a scope range and the override switch.

mod parameter_name;

pub use parameter_name::{ParameterName, CODE, DEFAULT_FORMAT, NAME};

use regex::Regex;
use stylecheck_core::{CheckConfig, ConfigError, Scope, ScopeFilter};

/// Option key of the naming pattern.
pub const OPT_FORMAT: &str = "format";
/// Option key of the least visible checked scope.
pub const OPT_SCOPE: &str = "scope";
/// Option key of the excluded scope.
pub const OPT_EXCLUDE_SCOPE: &str = "excludeScope";
/// Option key of the override switch.
pub const OPT_IGNORE_OVERRIDDEN: &str = "ignoreOverridden";

/// Compiled naming pattern that keeps its source text for messages.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    anchored: Regex,
}

impl NamePattern {
    /// Compiles `source` for full-string matching.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the expression does not
    /// compile.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let anchored = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            ConfigError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            anchored,
        })
    }

    /// Pattern as written in the configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the whole of `ident` matches.
    #[must_use]
    pub fn matches(&self, ident: &str) -> bool {
        self.anchored.is_match(ident)
    }
}

/// Immutable configuration of a naming check.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// Pattern identifiers must fully match.
    pub pattern: NamePattern,
    /// Scope range of checked declarations.
    pub filter: ScopeFilter,
    /// Skip parameters of methods marked as overriding.
    pub ignore_overridden: bool,
}

impl NamingConfig {
    /// Creates a configuration with `format`, no scope restriction and
    /// overridden methods checked.
    ///
    /// # Errors
    ///
    /// Returns an error if `format` does not compile.
    pub fn new(format: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: NamePattern::new(format)?,
            filter: ScopeFilter::new(),
            ignore_overridden: false,
        })
    }

    /// Reads `format`, `scope`, `excludeScope` and `ignoreOverridden` from
    /// a check section, falling back to `default_format`.
    ///
    /// # Errors
    ///
    /// Returns an error for a pattern that does not compile, an unknown
    /// scope name, or an option of the wrong type.
    pub fn from_config(section: &CheckConfig, default_format: &str) -> Result<Self, ConfigError> {
        let format = section.try_str(OPT_FORMAT)?.unwrap_or(default_format);
        let mut config = Self::new(format)?;
        if let Some(scope) = section.try_scope(OPT_SCOPE)? {
            config.filter = config.filter.scope(scope);
        }
        if let Some(scope) = section.try_scope(OPT_EXCLUDE_SCOPE)? {
            config.filter = config.filter.exclude_scope(scope);
        }
        if let Some(ignore) = section.try_bool(OPT_IGNORE_OVERRIDDEN)? {
            config.ignore_overridden = ignore;
        }
        Ok(config)
    }

    /// Returns `true` if a declaration resolved to `scope` is in range.
    #[must_use]
    pub fn in_scope(&self, scope: Scope) -> bool {
        self.filter.accepts(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matches_whole_identifier() {
        let pattern = NamePattern::new("[a-z]+").unwrap();
        assert!(pattern.matches("abc"));
        assert!(!pattern.matches("abcD"));
        assert!(!pattern.matches("Dabc"));
        assert_eq!(pattern.as_str(), "[a-z]+");
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let pattern = NamePattern::new("a|bc").unwrap();
        assert!(pattern.matches("a"));
        assert!(pattern.matches("bc"));
        assert!(!pattern.matches("abc"));
    }

    #[test]
    fn invalid_pattern_fails_at_build_time() {
        let err = NamePattern::new("[a-z").unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[a-z"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_every_option() {
        let section = CheckConfig::new()
            .with_option(OPT_FORMAT, "^h$")
            .with_option(OPT_SCOPE, "protected")
            .with_option(OPT_EXCLUDE_SCOPE, "public")
            .with_option(OPT_IGNORE_OVERRIDDEN, true);
        let config = NamingConfig::from_config(&section, DEFAULT_FORMAT).unwrap();

        assert_eq!(config.pattern.as_str(), "^h$");
        assert_eq!(config.filter.scope, Some(Scope::Protected));
        assert_eq!(config.filter.exclude_scope, Some(Scope::Public));
        assert!(config.ignore_overridden);
        assert!(config.in_scope(Scope::Protected));
        assert!(!config.in_scope(Scope::Public));
        assert!(!config.in_scope(Scope::Package));
    }

    #[test]
    fn defaults_apply_without_options() {
        let config = NamingConfig::from_config(&CheckConfig::new(), DEFAULT_FORMAT).unwrap();
        assert_eq!(config.pattern.as_str(), DEFAULT_FORMAT);
        assert_eq!(config.filter, ScopeFilter::new());
        assert!(!config.ignore_overridden);
        assert!(config.in_scope(Scope::AnonInner));
    }

    #[test]
    fn unknown_scope_fails_at_build_time() {
        let section = CheckConfig::new().with_option(OPT_SCOPE, "everywhere");
        assert!(matches!(
            NamingConfig::from_config(&section, DEFAULT_FORMAT),
            Err(ConfigError::UnknownScope(_))
        ));
    }
}
