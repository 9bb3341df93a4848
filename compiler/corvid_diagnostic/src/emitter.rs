//! Plain-text rendering of diagnostics.

use std::fmt::Write;

use corvid_ir::Span;

use crate::Diagnostic;

/// 1-based line and column of a byte offset. Columns count characters.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;
    for (i, b) in source.bytes().enumerate().take(offset) {
        if b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    let column = source
        .get(line_start..offset)
        .map_or(0, |prefix| prefix.chars().count());
    (line, u32::try_from(column).unwrap_or(u32::MAX).saturating_add(1))
}

/// Render `diagnostic` against `source`:
///
/// ```text
/// error[E1002]: expected `;`, found `}`
///   --> demo.cv:3:14
///    = note: ...
/// ```
pub fn render(diagnostic: &Diagnostic, path: &str, source: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{diagnostic}");
    let span = diagnostic.primary_span().unwrap_or(Span::DUMMY);
    let (line, col) = offset_to_line_col(source, span.start);
    let _ = writeln!(out, "  --> {path}:{line}:{col}");
    for (i, label) in diagnostic.labels.iter().enumerate() {
        let (line, col) = offset_to_line_col(source, label.span.start);
        let marker = if i == 0 { '^' } else { '-' };
        let _ = writeln!(out, "   {marker} {line}:{col}: {}", label.message);
    }
    for note in &diagnostic.notes {
        let _ = writeln!(out, "   = note: {note}");
    }
    out
}
