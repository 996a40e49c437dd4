//! Check presets for common configurations.

use crate::naming::{self, OPT_IGNORE_OVERRIDDEN, OPT_SCOPE};
use std::collections::HashMap;
use std::str::FromStr;
use stylecheck_core::CheckConfig;

/// Preset configurations for stylecheck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Every check with its default options.
    #[default]
    Recommended,
    /// Only publicly visible code, overriding methods skipped. For gradual
    /// adoption.
    Minimal,
}

impl Preset {
    /// Returns the preset name as used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Minimal => "minimal",
        }
    }

    /// Returns the check sections this preset starts from.
    #[must_use]
    pub fn sections(self) -> HashMap<String, CheckConfig> {
        let parameter_name = match self {
            Self::Recommended => CheckConfig::new(),
            Self::Minimal => CheckConfig::new()
                .with_option(OPT_SCOPE, "public")
                .with_option(OPT_IGNORE_OVERRIDDEN, true),
        };
        HashMap::from([(naming::NAME.to_string(), parameter_name)])
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}

/// Overlays `user` onto `base`: `enabled`, `severity` and every option set
/// in `user` win.
#[must_use]
pub fn merge_sections(base: &CheckConfig, user: &CheckConfig) -> CheckConfig {
    let mut merged = base.clone();
    if user.enabled.is_some() {
        merged.enabled = user.enabled;
    }
    if user.severity.is_some() {
        merged.severity = user.severity;
    }
    merged
        .options
        .extend(user.options.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
