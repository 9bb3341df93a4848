//! Diagnostic sinks.
//!
//! A [`DiagnosticSink`] accepts diagnostics from any phase. Reporting never
//! fails: a sink that decides to drop a diagnostic does so silently.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::Diagnostic;

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Proof that at least one error was reported.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// `Some` only when `count` errors were actually reported.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then_some(ErrorGuaranteed(()))
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics with the same code, primary span and message.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limit and no deduplication.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    #[must_use]
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// Ordered collection of reported diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    error_count: usize,
    dropped: usize,
    config: DiagnosticConfig,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticBag {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            dropped: 0,
            config,
        }
    }

    /// Report an error and receive proof that it was reported.
    ///
    /// The proof is returned even when the error limit drops the diagnostic:
    /// the limit only reached because earlier errors were kept.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error());
        self.report(diagnostic);
        ErrorGuaranteed(())
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Diagnostics rejected by the limit or deduplication.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn report(&mut self, diagnostic: Diagnostic) {
        let is_error = diagnostic.is_error();
        if is_error && self.limit_reached() {
            self.dropped += 1;
            return;
        }
        if self.config.deduplicate && !self.seen.insert(diagnostic.clone()) {
            self.dropped += 1;
            return;
        }
        if is_error {
            self.error_count += 1;
        }
        tracing::trace!(code = %diagnostic.code, message = %diagnostic.message, "diagnostic reported");
        self.diagnostics.push(diagnostic);
    }
}
