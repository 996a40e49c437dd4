//! Shared output formatting for check results.

use anyhow::Result;
use miette::{NamedSource, Report};
use std::path::{Path, PathBuf};
use stylecheck_core::{LintResult, Severity, ViolationDiagnostic};

use crate::OutputFormat;

/// Print check results in the specified format. `root` locates the
/// sources for snippet output.
pub fn print(result: &LintResult, root: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Pretty => print_pretty(result, root),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for (file, violations) in result.by_file() {
        println!("{}", file.display());
        for violation in violations {
            println!(
                "  {} {} [{}]",
                severity_indicator(violation.severity),
                violation.report_line(),
                violation.code,
            );
        }
        println!();
    }
    print_summary(result);
}

fn print_pretty(result: &LintResult, root: &Path) {
    for report in render_pretty(result, root) {
        println!("{report}");
    }
    print_summary(result);
}

/// Renders every violation as an annotated snippet of its source. A file
/// that cannot be read falls back to its compact line.
fn render_pretty(result: &LintResult, root: &Path) -> Vec<String> {
    let mut rendered = Vec::new();
    for (file, violations) in result.by_file() {
        let path = source_path(root, file);
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Cannot show source of {}: {}", path.display(), e);
                rendered.extend(violations.iter().map(ToString::to_string));
                continue;
            }
        };
        let name = file.display().to_string();
        for violation in violations {
            let report = Report::new(ViolationDiagnostic::from(violation))
                .with_source_code(NamedSource::new(&name, source.clone()));
            rendered.push(format!("{report:?}"));
        }
    }
    rendered
}

/// Locates the source of a reported file. A single-file root is the
/// source itself.
fn source_path(root: &Path, file: &Path) -> PathBuf {
    if root.is_file() {
        root.to_path_buf()
    } else {
        root.join(file)
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
