use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the storage medium. A corrupt document is not an error: it
/// reads as an empty library.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize library")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
