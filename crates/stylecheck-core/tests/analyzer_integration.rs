//! Integration test: file discovery, parsing and dispatch end-to-end via
//! Analyzer, using a line-based toy language.
//!
//! Each line `name(a, b)` declares a method with parameters; a line
//! starting with `!` is a syntax error.

use stylecheck_core::messages::MSG_INVALID_PATTERN;
use stylecheck_core::{
    Analyzer, AnalyzerError, Check, CheckContext, Config, NewNode, NodeId, NodeKind, ParamKind,
    ParseError, Position, Severity, SourceParser, SyntaxTree, TokenType, TreeBuilder, Violation,
    PARSE_ERROR_CODE,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct ToyParser;

impl SourceParser for ToyParser {
    fn language_id(&self) -> &'static str {
        "toy"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toy"]
    }

    fn parse(&self, unit: &str, source: &str, _tab: usize) -> Result<SyntaxTree, ParseError> {
        let mut builder = TreeBuilder::new(unit);
        let root = builder.root();
        for (i, line) in source.lines().enumerate() {
            let line_no = i + 1;
            if line.starts_with('!') {
                return Err(ParseError::Syntax {
                    line: line_no,
                    column: 1,
                    message: "bang".to_string(),
                });
            }
            let Some((name, rest)) = line.split_once('(') else {
                continue;
            };
            let method = builder.push(
                root,
                NewNode::new(NodeKind::Method, name.trim(), Position::new(line_no, 1)),
            )?;
            let params = rest.trim_end_matches(')');
            let mut column = name.len() + 2;
            for param in params.split(',') {
                let ident = param.trim();
                if !ident.is_empty() {
                    let lead = param.len() - param.trim_start().len();
                    builder.push(
                        method,
                        NewNode::new(
                            NodeKind::Parameter(ParamKind::Formal),
                            ident,
                            Position::new(line_no, column + lead),
                        ),
                    )?;
                }
                column += param.len() + 1;
            }
        }
        Ok(builder.build())
    }
}

/// Flags parameters starting with an uppercase letter.
struct LowercaseParams;

impl Check for LowercaseParams {
    fn name(&self) -> &'static str {
        "lowercase-params"
    }

    fn code(&self) -> &'static str {
        "T001"
    }

    fn acceptable_tokens(&self) -> &'static [TokenType] {
        &[TokenType::ParameterDef]
    }

    fn required_tokens(&self) -> &'static [TokenType] {
        &[TokenType::ParameterDef]
    }

    fn evaluate(&self, ctx: &CheckContext<'_>, node: NodeId) -> Option<Violation> {
        let node = ctx.node(node)?;
        if node.ident.starts_with(|c: char| c.is_ascii_lowercase()) {
            return None;
        }
        Some(Violation::new(
            self.code(),
            self.name(),
            self.default_severity(),
            ctx.location(node),
            MSG_INVALID_PATTERN,
            vec![node.ident.clone(), "^[a-z]".to_string()],
        ))
    }
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn toy_config(extra: &str) -> Config {
    Config::parse(&format!("[checker]\nextensions = [\"toy\"]\n{extra}")).unwrap()
}

fn analyzer(root: &Path, config: Config) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .parser(ToyParser)
        .config(config)
        .check(LowercaseParams)
        .build()
        .unwrap()
}

#[test]
fn reports_violations_across_files_in_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.toy", "run(Fast, slow)\n");
    write(dir.path(), "a.toy", "go(x, Y)\nstop(Z)\n");
    write(dir.path(), "notes.txt", "ignored(Upper)\n");

    let result = analyzer(dir.path(), toy_config("")).analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    let lines: Vec<String> = result
        .violations
        .iter()
        .map(|v| format!("{} {}", v.location.file.display(), v.report_line()))
        .collect();
    assert_eq!(
        lines,
        [
            "a.toy 1:7: Name 'Y' must match pattern '^[a-z]'.",
            "a.toy 2:6: Name 'Z' must match pattern '^[a-z]'.",
            "b.toy 1:5: Name 'Fast' must match pattern '^[a-z]'.",
        ]
    );
}

#[test]
fn unparseable_file_yields_one_diagnostic_and_others_still_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.toy", "ok(A)\n!broken\nmore(B)\n");
    write(dir.path(), "b.toy", "fine(C)\n");

    let result = analyzer(dir.path(), toy_config("")).analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    let a: Vec<&Violation> = result
        .violations
        .iter()
        .filter(|v| v.location.file == Path::new("a.toy"))
        .collect();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].code, PARSE_ERROR_CODE);
    assert_eq!((a[0].location.line, a[0].location.column), (2, 1));
    assert!(result
        .violations
        .iter()
        .any(|v| v.location.file == Path::new("b.toy") && v.message_args[0] == "C"));
}

#[test]
fn fail_on_parse_error_aborts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.toy", "!broken\n");

    let config = toy_config("fail_on_parse_error = true\n");
    let err = analyzer(dir.path(), config).analyze().unwrap_err();
    assert!(matches!(err, AnalyzerError::Parse { .. }));
}

#[test]
fn unreadable_file_yields_one_diagnostic_and_others_still_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.toy", "m(Bad)\n");
    fs::write(dir.path().join("latin1.toy"), b"m(caf\xe9)\n").unwrap();

    let result = analyzer(dir.path(), toy_config("")).analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    let lines: Vec<String> = result
        .violations
        .iter()
        .map(|v| format!("{} {} {}", v.location.file.display(), v.code, v.location.line))
        .collect();
    assert_eq!(lines, ["good.toy T001 1", "latin1.toy SC001 1"]);
    let unreadable = &result.violations[1];
    assert_eq!(unreadable.location.column, 1);
    assert!(unreadable.message.starts_with("Unable to read file:"));
    assert!(result.has_errors());
}

#[test]
fn unreadable_file_aborts_on_request() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("latin1.toy"), b"m(caf\xe9)\n").unwrap();

    let config = toy_config("fail_on_parse_error = true\n");
    let err = analyzer(dir.path(), config).analyze().unwrap_err();
    match err {
        AnalyzerError::Read { path, .. } => assert_eq!(path, Path::new("latin1.toy")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn disabled_check_reports_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.toy", "go(X)\n");

    let config = toy_config("[checks.lowercase-params]\nenabled = false\n");
    let analyzer = analyzer(dir.path(), config);
    assert_eq!(analyzer.check_count(), 0);
    assert!(analyzer.analyze().unwrap().violations.is_empty());
}

#[test]
fn severity_override_applies() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.toy", "go(X)\n");

    let config = toy_config("[checks.lowercase-params]\nseverity = \"warning\"\n");
    let result = analyzer(dir.path(), config).analyze().unwrap();
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[test]
fn excluded_and_gitignored_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".gitignore", "ignored/\n");
    write(dir.path(), "ignored/a.toy", "go(X)\n");
    write(dir.path(), "gen/b.toy", "go(Y)\n");
    write(dir.path(), "src/c.toy", "go(Z)\n");

    let config = toy_config("exclude = [\"gen/**\"]\n");
    let result = analyzer(dir.path(), config).analyze().unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, Path::new("src/c.toy"));
}
