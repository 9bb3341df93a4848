//! Diagnostic system for the Corvid compiler.
//!
//! Every phase reports user-facing problems as a [`Diagnostic`]:
//! - an [`ErrorCode`] whose first digit names the phase
//! - a message saying what went wrong
//! - labeled spans saying where
//! - notes with context
//!
//! Diagnostics flow into a [`DiagnosticSink`]. Reporting never fails; the
//! default sink, [`DiagnosticBag`], applies the limits of a [`DiagnosticConfig`].
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained by reporting an error, so a
//! function returning `Result<T, ErrorGuaranteed>` proves it told the user why.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod sink;

pub use diagnostic::{expected_token, unexpected_token, Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use sink::{DiagnosticBag, DiagnosticConfig, DiagnosticSink, ErrorGuaranteed};
