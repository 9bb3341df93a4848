#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::*;

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_owned()).collect()
}

#[test]
fn classify_prints_one_line_per_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.cs", "class A {\n  int n = 1;\n}");
    let report = run(
        &args(&["classify", path.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap();

    let lines: Vec<&str> = report.output.lines().collect();
    assert_eq!(lines[0], "1:1 \"class\" keyword");
    assert!(lines.contains(&"1:7 \"A\" class name"));
    assert!(lines.contains(&"2:7 \"n\" field name"));
    assert!(lines.contains(&"2:11 \"1\" number"));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn classify_renders_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "broken.cs", "class A { int = ; }");
    let report = run(
        &args(&["classify", path.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap();
    assert!(!report.diagnostics.is_empty());
    assert!(report.diagnostics[0].starts_with("error[E1"));
    assert!(report.diagnostics[0].contains("broken.cs:1:"));
}

#[test]
fn diff_reports_the_changed_region() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(&dir, "old.cs", "class A {\n  int n = 1;\n}");
    let new = write(&dir, "new.cs", "class A {\n  int n = 42;\n}");
    let report = run(
        &args(&["diff", old.to_str().unwrap(), new.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap();

    let lines: Vec<&str> = report.output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2:"));
    assert!(lines[0].ends_with("(+1 bytes)"));
    assert!(lines[1].contains('1'));
    assert!(lines[2].contains("42"));
}

#[test]
fn diff_of_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(&dir, "old.cs", "class A { }");
    let new = write(&dir, "new.cs", "class A { }");
    let report = run(
        &args(&["diff", old.to_str().unwrap(), new.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap();
    assert_eq!(report.output, "no changes\n");
}

#[test]
fn help_and_usage_errors() {
    let help = run(&[], ServicesConfig::default()).unwrap();
    assert!(help.output.starts_with("Usage: corvid"));
    assert_eq!(run(&args(&["help"]), ServicesConfig::default()).unwrap(), help);

    assert!(matches!(
        run(&args(&["classify"]), ServicesConfig::default()),
        Err(CliError::Usage(_))
    ));
    assert!(matches!(
        run(&args(&["diff", "only-one"]), ServicesConfig::default()),
        Err(CliError::Usage(_))
    ));
    assert!(matches!(
        run(&args(&["format"]), ServicesConfig::default()),
        Err(CliError::UnknownCommand(command)) if command == "format"
    ));
}

#[test]
fn missing_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(&dir, "old.cs", "class A { }");
    let missing = dir.path().join("missing.cs");

    let error = run(
        &args(&["classify", missing.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(error, CliError::Host(_)));

    let error = run(
        &args(&["diff", old.to_str().unwrap(), missing.to_str().unwrap()]),
        ServicesConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(error, CliError::Read { .. }));
    assert!(error.to_string().contains("missing.cs"));
}
