//! Registry of built-in checks.
//!
//! Turns a [`Config`] into check registrations once, before any file is
//! read, so that every configuration error surfaces up front.

use crate::naming::{self, ParameterName};
use crate::presets::{merge_sections, Preset};
use stylecheck_core::{
    CheckBox, CheckConfig, CheckRegistration, Config, ConfigError, Severity, TokenType,
};
use tracing::{debug, warn};

/// Option key of an explicit token list.
pub const OPT_TOKENS: &str = "tokens";

/// Static description of a built-in check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    /// Check code (e.g., "SC101").
    pub code: &'static str,
    /// Check name (e.g., "parameter-name").
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Severity when none is configured.
    pub default_severity: Severity,
    /// Token types the check can process.
    pub acceptable_tokens: &'static [TokenType],
}

/// Describes every built-in check.
///
/// # Errors
///
/// Returns an error if a check cannot be built with its defaults.
pub fn available_checks() -> Result<Vec<CheckInfo>, ConfigError> {
    let checks: Vec<CheckBox> = vec![Box::new(ParameterName::new()?)];
    Ok(checks
        .iter()
        .map(|c| CheckInfo {
            code: c.code(),
            name: c.name(),
            description: c.description(),
            default_severity: c.default_severity(),
            acceptable_tokens: c.acceptable_tokens(),
        })
        .collect())
}

/// Builds the check called `name` from its section. Returns `None` for
/// names no built-in check answers to.
///
/// # Errors
///
/// Returns an error if the section is invalid, including a token list
/// naming tokens the check cannot process.
pub fn build_check(
    name: &str,
    section: &CheckConfig,
) -> Result<Option<CheckRegistration>, ConfigError> {
    let check: CheckBox = match name {
        naming::NAME => Box::new(ParameterName::from_config(section)?),
        _ => return Ok(None),
    };

    let registration = match section.try_tokens(OPT_TOKENS)? {
        Some(tokens) => {
            let acceptable = check.acceptable_tokens();
            if let Some(bad) = tokens.iter().find(|t| !acceptable.contains(t)) {
                return Err(ConfigError::InvalidOption {
                    key: format!("{OPT_TOKENS} ({bad})"),
                    expected: "a list of acceptable tokens",
                });
            }
            CheckRegistration::with_tokens(check, tokens)
        }
        None => CheckRegistration::new(check),
    };
    Ok(Some(registration))
}

/// Builds registrations for every check of the configured preset, with the
/// user's sections laid over the preset's.
///
/// Disabled checks are skipped. When `only` is given, just the named
/// checks are built.
///
/// # Errors
///
/// Returns an error for an unknown preset or an invalid check section.
/// The error names the check it came from.
pub fn registrations_from_config(
    config: &Config,
    only: Option<&[String]>,
) -> Result<Vec<CheckRegistration>, ConfigError> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse::<Preset>().map_err(|message| ConfigError::Parse { message })?,
        None => Preset::default(),
    };

    for name in config.checks.keys() {
        if !preset.sections().contains_key(name) {
            warn!("Ignoring configuration for unknown check: {}", name);
        }
    }

    let mut names: Vec<(String, CheckConfig)> = preset.sections().into_iter().collect();
    names.sort_by(|a, b| a.0.cmp(&b.0));

    let mut registrations = Vec::new();
    for (name, base) in names {
        if only.is_some_and(|only| !only.iter().any(|n| *n == name)) {
            debug!("Check not selected: {}", name);
            continue;
        }
        let section = match config.check(&name) {
            Some(user) => merge_sections(&base, user),
            None => base,
        };
        if section.enabled == Some(false) {
            debug!("Skipping disabled check: {}", name);
            continue;
        }
        if let Some(registration) =
            build_check(&name, &section).map_err(|e| e.in_check(&name))?
        {
            registrations.push(registration);
        }
    }
    Ok(registrations)
}
