//! Corvid language services.
//!
//! [`AnalysisHost`] keeps versioned documents, each with its parse and its
//! syntactic classification. Edits reparse incrementally and reclassify only
//! the region the change range says may differ; semantic classification is
//! computed on demand. Files opened from disk share their parse through a
//! [`corvid_cache::MetadataCache`] keyed by path and modification time.
//!
//! The `corvid` binary is a thin front end over [`commands`].

pub mod commands;
mod config;
mod error;
mod host;
mod logging;

pub use config::ServicesConfig;
pub use error::{CliError, HostError};
pub use host::{AnalysisHost, Document, DocumentId};
pub use logging::init_tracing;
