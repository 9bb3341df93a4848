use std::path::PathBuf;

/// Error during metadata cache operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error at '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },
    /// The loader could not produce metadata for the file.
    #[error("cannot load metadata for '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CacheError::Load {
            path: path.into(),
            message: message.into(),
        }
    }
}
