//! Error types

use std::path::PathBuf;

/// Errors raised while loading input, writing output or validating options.
///
/// The word pipeline itself never fails; rejected words come back empty.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid format for --email-split: '{0}'. Expected format: user:domain")]
    InvalidEmailSplit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
