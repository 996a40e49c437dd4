//! Configuration types for stylecheck.

use crate::scope::{Scope, UnknownScope};
use crate::token::{TokenType, UnknownToken};
use crate::types::Severity;
use crate::utils::text::DEFAULT_TAB_WIDTH;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level configuration for stylecheck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("recommended" or "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Checker (file discovery and parsing) configuration.
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Per-check configurations, keyed by check name.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled. Checks without a section are enabled.
    #[must_use]
    pub fn is_check_enabled(&self, name: &str) -> bool {
        self.checks
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a check.
    #[must_use]
    pub fn check_severity(&self, name: &str) -> Option<Severity> {
        self.checks.get(name).and_then(|c| c.severity)
    }

    /// Returns the section of a check, if any.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckConfig> {
        self.checks.get(name)
    }
}

/// File discovery and parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Root directory to check (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from checking.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to check, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Tab width used for column computation.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Abort the run on the first unparseable file instead of reporting it.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/target/**".to_string(), "**/build/**".to_string()],
            extensions: default_extensions(),
            respect_gitignore: true,
            tab_width: DEFAULT_TAB_WIDTH,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_tab_width() -> usize {
    DEFAULT_TAB_WIDTH
}

/// Per-check configuration.
///
/// Besides `enabled` and `severity`, every key of a `[checks.<name>]`
/// section is kept as a raw option and interpreted by the check itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Check-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl CheckConfig {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a raw option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Gets a boolean option.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is present but not a boolean.
    pub fn try_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.options
            .get(key)
            .map(|v| v.as_bool().ok_or_else(|| invalid(key, "a boolean")))
            .transpose()
    }

    /// Gets a string option.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is present but not a string.
    pub fn try_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        self.options
            .get(key)
            .map(|v| v.as_str().ok_or_else(|| invalid(key, "a string")))
            .transpose()
    }

    /// Gets a scope option.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is not a string or names no scope.
    pub fn try_scope(&self, key: &str) -> Result<Option<Scope>, ConfigError> {
        self.try_str(key)?
            .map(|name| name.parse::<Scope>().map_err(ConfigError::from))
            .transpose()
    }

    /// Gets a token list option. Accepts an array of names or a single
    /// comma-separated string.
    ///
    /// # Errors
    ///
    /// Returns an error if the option has another shape or names an
    /// unknown token type.
    pub fn try_tokens(&self, key: &str) -> Result<Option<Vec<TokenType>>, ConfigError> {
        let Some(value) = self.options.get(key) else {
            return Ok(None);
        };
        let names: Vec<&str> = match value {
            toml::Value::String(s) => s.split(',').filter(|t| !t.trim().is_empty()).collect(),
            toml::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| invalid(key, "an array of strings")))
                .collect::<Result<_, _>>()?,
            _ => return Err(invalid(key, "an array of token names")),
        };
        names
            .into_iter()
            .map(|name| name.parse::<TokenType>().map_err(ConfigError::from))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn invalid(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidOption {
        key: key.to_string(),
        expected,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A naming pattern failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Pattern source text.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A scope option named no scope.
    #[error(transparent)]
    UnknownScope(#[from] UnknownScope),

    /// A token option named no token type.
    #[error(transparent)]
    UnknownToken(#[from] UnknownToken),

    /// An option had the wrong type.
    #[error("option '{key}' must be {expected}")]
    InvalidOption {
        /// Option key.
        key: String,
        /// Expected shape.
        expected: &'static str,
    },

    /// A check section was rejected.
    #[error("check '{check}': {source}")]
    Check {
        /// Check name.
        check: String,
        /// Underlying error.
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Attaches the name of the check whose section produced this error.
    #[must_use]
    pub fn in_check(self, check: &str) -> Self {
        Self::Check {
            check: check.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.checker.respect_gitignore);
        assert_eq!(config.checker.tab_width, 8);
        assert_eq!(config.checker.extensions, ["java"]);
        assert!(!config.checker.fail_on_parse_error);
        assert!(config.checks.is_empty());
        assert!(config.is_check_enabled("parameter-name"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[checker]
root = "./src"
exclude = ["**/generated/**"]
tab_width = 4

[checks.parameter-name]
severity = "warning"
format = "^[a-z][a-zA-Z0-9]*$"
scope = "public"
excludeScope = "protected"
ignoreOverridden = true
tokens = ["PARAMETER_DEF"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.checker.root, PathBuf::from("./src"));
        assert_eq!(config.checker.tab_width, 4);
        assert_eq!(config.checker.extensions, ["java"]);
        assert!(config.is_check_enabled("parameter-name"));
        assert_eq!(
            config.check_severity("parameter-name"),
            Some(Severity::Warning)
        );

        let section = config.check("parameter-name").unwrap();
        assert_eq!(section.try_str("format").unwrap(), Some("^[a-z][a-zA-Z0-9]*$"));
        assert_eq!(section.try_scope("scope").unwrap(), Some(Scope::Public));
        assert_eq!(
            section.try_scope("excludeScope").unwrap(),
            Some(Scope::Protected)
        );
        assert_eq!(section.try_bool("ignoreOverridden").unwrap(), Some(true));
        assert_eq!(
            section.try_tokens("tokens").unwrap(),
            Some(vec![TokenType::ParameterDef])
        );
    }

    #[test]
    fn disabled_check_is_reported_disabled() {
        let config = Config::parse("[checks.parameter-name]\nenabled = false\n").unwrap();
        assert!(!config.is_check_enabled("parameter-name"));
        assert!(config.is_check_enabled("other"));
    }

    #[test]
    fn missing_options_are_none() {
        let section = CheckConfig::new();
        assert_eq!(section.try_bool("ignoreOverridden").unwrap(), None);
        assert_eq!(section.try_scope("scope").unwrap(), None);
        assert_eq!(section.try_tokens("tokens").unwrap(), None);
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let section = CheckConfig::new().with_option("scope", "friends");
        let err = section.try_scope("scope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScope(_)));
        assert!(err.to_string().contains("friends"));
    }

    #[test]
    fn wrong_option_type_is_rejected() {
        let section = CheckConfig::new().with_option("ignoreOverridden", "yes");
        assert!(matches!(
            section.try_bool("ignoreOverridden"),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn tokens_accept_comma_separated_string() {
        let section = CheckConfig::new().with_option("tokens", "PARAMETER_DEF, method_def");
        assert_eq!(
            section.try_tokens("tokens").unwrap(),
            Some(vec![TokenType::ParameterDef, TokenType::MethodDef])
        );

        let bad = CheckConfig::new().with_option("tokens", "PARAM");
        assert!(matches!(
            bad.try_tokens("tokens"),
            Err(ConfigError::UnknownToken(_))
        ));
    }

    #[test]
    fn check_errors_name_the_check() {
        let err = ConfigError::InvalidOption {
            key: "format".to_string(),
            expected: "a string",
        }
        .in_check("parameter-name");
        assert_eq!(
            err.to_string(),
            "check 'parameter-name': option 'format' must be a string"
        );
    }
}
