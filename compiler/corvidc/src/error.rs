use std::path::PathBuf;

use corvid_cache::CacheError;
use corvid_ir::Cancelled;
use corvid_syntax::TextChangeError;

use crate::DocumentId;

/// Failure of an [`AnalysisHost`](crate::AnalysisHost) operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no open document {0}")]
    UnknownDocument(DocumentId),
    #[error(transparent)]
    Edit(#[from] TextChangeError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("operation cancelled")]
    Cancelled(#[from] Cancelled),
}

/// Failure of a `corvid` command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Host(#[from] HostError),
}
