//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use stylecheck_checks::{available_checks, registrations_from_config};
use stylecheck_core::{Analyzer, Config};
use stylecheck_java::JavaParser;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated check names or codes to run.
    pub checks: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Abort on the first file that does not parse.
    pub fail_on_parse_error: bool,
}

/// Runs the check command. Returns `true` if error-level violations were
/// reported.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = load_config(source)?;

    let only = options
        .checks
        .as_deref()
        .map(select_checks)
        .transpose()?;
    let registrations = registrations_from_config(&config, only.as_deref())
        .context("Invalid check configuration")?;

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(JavaParser::new())
        .excludes(options.exclude.iter().cloned())
        .registrations(registrations)
        .config(config);
    if options.fail_on_parse_error {
        builder = builder.fail_on_parse_error(true);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} check(s)",
        path.display(),
        analyzer.check_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, analyzer.root(), options.format)?;

    Ok(result.has_errors())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    tracing::info!("Using {}", source);
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Maps a comma-separated list of names or codes to check names.
fn select_checks(filter: &str) -> Result<Vec<String>> {
    let known = available_checks()?;
    let mut names = Vec::new();
    for wanted in filter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match known
            .iter()
            .find(|c| c.name == wanted || c.code.eq_ignore_ascii_case(wanted))
        {
            Some(info) => names.push(info.name.to_string()),
            None => tracing::warn!("Unknown check: {}", wanted),
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "class A {\n    void m(int Bad) {}\n}\n";

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("A.java"), SOURCE).unwrap();
        tmp
    }

    #[test]
    fn select_checks_accepts_names_and_codes() {
        assert_eq!(select_checks("parameter-name").unwrap(), ["parameter-name"]);
        assert_eq!(select_checks("sc101, nope").unwrap(), ["parameter-name"]);
        assert!(select_checks("nope").unwrap().is_empty());
    }

    #[test]
    fn reports_errors_with_default_config() {
        let tmp = project();
        let options = CheckOptions {
            format: OutputFormat::Compact,
            ..CheckOptions::default()
        };
        assert!(run(tmp.path(), &options, &ConfigSource::Default).unwrap());
    }

    #[test]
    fn project_config_can_lower_severity() {
        let tmp = project();
        let config = tmp.path().join("stylecheck.toml");
        fs::write(&config, "[checks.parameter-name]\nseverity = \"warning\"\n").unwrap();

        let options = CheckOptions {
            format: OutputFormat::Compact,
            ..CheckOptions::default()
        };
        assert!(!run(tmp.path(), &options, &ConfigSource::Project(config)).unwrap());
    }

    #[test]
    fn unselected_checks_do_not_run() {
        let tmp = project();
        let options = CheckOptions {
            format: OutputFormat::Json,
            checks: Some("no-such-check".into()),
            ..CheckOptions::default()
        };
        assert!(!run(tmp.path(), &options, &ConfigSource::Default).unwrap());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp = project();
        let config = tmp.path().join("stylecheck.toml");
        fs::write(&config, "[checks.parameter-name]\nscope = \"everywhere\"\n").unwrap();

        let result = run(
            tmp.path(),
            &CheckOptions::default(),
            &ConfigSource::Explicit(config),
        );
        assert!(result.is_err());
    }

    #[test]
    fn parse_errors_abort_on_request() {
        let tmp = project();
        fs::write(tmp.path().join("Broken.java"), "class {").unwrap();

        let lenient = CheckOptions {
            format: OutputFormat::Compact,
            checks: Some("no-such-check".into()),
            ..CheckOptions::default()
        };
        // The parse failure itself is reported as an error.
        assert!(run(tmp.path(), &lenient, &ConfigSource::Default).unwrap());

        let strict = CheckOptions {
            fail_on_parse_error: true,
            ..lenient
        };
        assert!(run(tmp.path(), &strict, &ConfigSource::Default).is_err());
    }
}
