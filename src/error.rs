use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Cannot read repository root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    WalkError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum GoModError {
    #[error("go.mod not found at: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
