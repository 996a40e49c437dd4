//! Core analyzer for orchestrating check runs.

use crate::config::Config;
use crate::context::CheckContext;
use crate::messages::{MSG_PARSE_ERROR, MSG_READ_ERROR};
use crate::parser::{ParseError, SourceParser};
use crate::types::{LintResult, Location, Severity, Violation};
use crate::walker::{CheckRegistration, TreeWalker, WalkerError};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Code reported for files that cannot be parsed.
pub const PARSE_ERROR_CODE: &str = "SC001";

/// Check name reported for files that cannot be parsed.
pub const PARSE_ERROR_CHECK: &str = "parse-error";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Error reading a source file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Check registration error.
    #[error(transparent)]
    Walker(#[from] WalkerError),

    /// No parser was configured.
    #[error("no source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    registrations: Vec<CheckRegistration>,
    parser: Option<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a check with its default tokens.
    #[must_use]
    pub fn check<C: crate::Check + 'static>(mut self, check: C) -> Self {
        self.registrations
            .push(CheckRegistration::new(Box::new(check)));
        self
    }

    /// Adds a check registration.
    #[must_use]
    pub fn registration(mut self, registration: CheckRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Adds several check registrations.
    #[must_use]
    pub fn registrations<I>(mut self, registrations: I) -> Self
    where
        I: IntoIterator<Item = CheckRegistration>,
    {
        self.registrations.extend(registrations);
        self
    }

    /// Sets the source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors. Overrides the configuration.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser is set, the current directory cannot
    /// be read, an exclude pattern is invalid, or a check asks for tokens
    /// it cannot process.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.checker.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.checker.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(String::as_str)
            .map(glob::Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut walker = TreeWalker::builder();
        for registration in self.registrations {
            let name = registration.check.name();
            if config.is_check_enabled(name) {
                walker = walker.registration(registration);
            } else {
                debug!("Skipping disabled check: {}", name);
            }
        }

        Ok(Analyzer {
            root,
            walker: walker.build()?,
            parser,
            excludes,
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.checker.fail_on_parse_error),
            config,
        })
    }
}

/// The main analyzer that orchestrates check runs.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    walker: TreeWalker,
    parser: Box<dyn SourceParser>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.walker.checks().len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// Files are processed in parallel; the result is sorted by file, line
    /// and column.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or
    /// a file cannot be parsed while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let outcomes: Vec<Result<Vec<Violation>, AnalyzerError>> =
            files.par_iter().map(|path| self.analyze_file(path)).collect();

        let mut result = LintResult::new();
        for outcome in outcomes {
            result.violations.extend(outcome?);
            result.files_checked += 1;
        }
        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one source text. `path` is reported as-is.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the source cannot be parsed.
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<Vec<Violation>, ParseError> {
        let unit_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tree = self
            .parser
            .parse(&unit_name, source, self.config.checker.tab_width)?;
        let ctx = CheckContext::new(path, &tree);
        let violations = self.walker.walk(&ctx);
        Ok(self.apply_severity_overrides(violations))
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let relative = match path.strip_prefix(&self.root) {
            Ok(r) if !r.as_os_str().is_empty() => r,
            // A single-file root reports the file by name
            _ => path.file_name().map_or(path, Path::new),
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                warn!("Failed to read {}: {}", relative.display(), source);
                if self.fail_on_parse_error {
                    return Err(AnalyzerError::Read {
                        path: relative.to_path_buf(),
                        source,
                    });
                }
                return Ok(vec![read_error_violation(relative, &source)]);
            }
        };

        match self.analyze_source(relative, &content) {
            Ok(violations) => Ok(violations),
            Err(source) => {
                warn!("Failed to parse {}: {}", relative.display(), source);
                if self.fail_on_parse_error {
                    return Err(AnalyzerError::Parse {
                        path: relative.to_path_buf(),
                        source,
                    });
                }
                Ok(vec![parse_error_violation(relative, &source)])
            }
        }
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_overrides(&self, violations: Vec<Violation>) -> Vec<Violation> {
        violations
            .into_iter()
            .map(|v| match self.config.check_severity(&v.check) {
                Some(severity) => v.with_severity(severity),
                None => v,
            })
            .collect()
    }

    /// Discovers all source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let extensions: Vec<&str> = if self.config.checker.extensions.is_empty() {
            self.parser.extensions().to_vec()
        } else {
            self.config
                .checker
                .extensions
                .iter()
                .map(String::as_str)
                .collect()
        };

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.checker.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));
            if !matches_ext {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either relative to the
    /// root or as given.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

/// Builds the single diagnostic reported for an unparseable file.
#[must_use]
pub fn parse_error_violation(path: &Path, error: &ParseError) -> Violation {
    let (line, column) = error.position().unwrap_or((1, 1));
    Violation::new(
        PARSE_ERROR_CODE,
        PARSE_ERROR_CHECK,
        Severity::Error,
        Location::new(path.to_path_buf(), line, column),
        MSG_PARSE_ERROR,
        vec![error.to_string()],
    )
}

/// Builds the single diagnostic reported for a file that cannot be read,
/// such as one that is not valid UTF-8.
#[must_use]
pub fn read_error_violation(path: &Path, error: &std::io::Error) -> Violation {
    Violation::new(
        PARSE_ERROR_CODE,
        PARSE_ERROR_CHECK,
        Severity::Error,
        Location::new(path.to_path_buf(), 1, 1),
        MSG_READ_ERROR,
        vec![error.to_string()],
    )
}
