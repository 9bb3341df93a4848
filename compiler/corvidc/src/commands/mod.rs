//! `corvid` subcommands.
//!
//! Each command renders its output into a [`Report`]; printing is left to
//! the binary.

use std::fmt::Write;
use std::path::Path;

use corvid_diagnostic::emitter::{offset_to_line_col, render};
use corvid_ir::{CancellationToken, Span};

use crate::{AnalysisHost, CliError, ServicesConfig};

pub const USAGE: &str = "\
Usage: corvid <command> [arguments]

Commands:
  classify <file>          Print the classified spans of a file
  diff <old> <new>         Print the change range between two versions of a file
  help                     Show this message

Environment:
  CORVID_LOG / RUST_LOG              Tracing filter, e.g. corvid_classify=debug
  CORVID_LOG_TREE                    Print tracing output as indented trees
  CORVID_CHANGE_RANGE_TIMEOUT_MS     Time budget of the change-range sweeps
  CORVID_METADATA_CACHE_CAPACITY     Initial capacity of the file cache
  CORVID_EMBEDDED_LANGUAGES          Classify JSON inside strings (on/off)";

/// Output of a command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// For standard output.
    pub output: String,
    /// Rendered diagnostics, for standard error.
    pub diagnostics: Vec<String>,
}

/// Run the command named by `args[0]`.
pub fn run(args: &[String], config: ServicesConfig) -> Result<Report, CliError> {
    let Some(command) = args.first() else {
        return Ok(help());
    };
    match command.as_str() {
        "classify" => {
            let [_, file] = args else {
                return Err(CliError::Usage("usage: corvid classify <file>".to_owned()));
            };
            classify_file(&mut AnalysisHost::new(config), Path::new(file))
        }
        "diff" => {
            let [_, old, new] = args else {
                return Err(CliError::Usage(
                    "usage: corvid diff <old-file> <new-file>".to_owned(),
                ));
            };
            diff_files(
                &mut AnalysisHost::new(config),
                Path::new(old),
                Path::new(new),
            )
        }
        "help" | "--help" | "-h" => Ok(help()),
        other => Err(CliError::UnknownCommand(other.to_owned())),
    }
}

fn help() -> Report {
    Report {
        output: format!("{USAGE}\n"),
        diagnostics: Vec::new(),
    }
}

/// One line per classified span: `line:col text tag`.
pub fn classify_file(host: &mut AnalysisHost, path: &Path) -> Result<Report, CliError> {
    let id = host.open_file(path)?;
    let cancel = CancellationToken::new();
    let text = host.document(id).map(crate::Document::text).unwrap_or_default();
    let whole = Span::try_from_range(0..text.len()).unwrap_or_default();
    let spans = host.classify(id, whole, &cancel)?;

    let mut output = String::new();
    for classified in spans {
        let (line, col) = offset_to_line_col(&text, classified.span.start);
        let snippet = text.get(classified.span.to_range()).unwrap_or_default();
        let _ = writeln!(output, "{line}:{col} {snippet:?} {}", classified.ty);
    }
    Ok(Report {
        output,
        diagnostics: diagnostics(host, id, path, &text)?,
    })
}

/// The change range between `old` and `new`, with `new` reparsed
/// incrementally against the tree of `old`.
pub fn diff_files(host: &mut AnalysisHost, old: &Path, new: &Path) -> Result<Report, CliError> {
    let id = host.open_file(old)?;
    let old_text = host.document(id).map(crate::Document::text).unwrap_or_default();
    let new_text = std::fs::read_to_string(new).map_err(|source| CliError::Read {
        path: new.to_path_buf(),
        source,
    })?;
    let range = host.set_text(id, &new_text, &CancellationToken::new())?;

    let mut output = String::new();
    if range.is_empty() {
        output.push_str("no changes\n");
    } else {
        let (line, col) = offset_to_line_col(&old_text, range.span.start);
        let _ = writeln!(
            output,
            "{line}:{col} old {} new {} ({:+} bytes)",
            range.span,
            range.new_span(),
            range.delta()
        );
        let removed = old_text.get(range.span.to_range()).unwrap_or_default();
        let inserted = new_text.get(range.new_span().to_range()).unwrap_or_default();
        let _ = writeln!(output, "- {removed:?}");
        let _ = writeln!(output, "+ {inserted:?}");
    }
    Ok(Report {
        output,
        diagnostics: diagnostics(host, id, new, &new_text)?,
    })
}

fn diagnostics(
    host: &AnalysisHost,
    id: crate::DocumentId,
    path: &Path,
    text: &str,
) -> Result<Vec<String>, CliError> {
    let bag = host.diagnostics(id)?;
    let path = path.display().to_string();
    let mut rendered: Vec<String> = bag
        .diagnostics()
        .iter()
        .map(|diagnostic| render(diagnostic, &path, text))
        .collect();
    if bag.dropped_count() > 0 {
        rendered.push(format!(
            "{} more diagnostics not shown\n",
            bag.dropped_count()
        ));
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests;
