use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A `CREATE TABLE` statement or one of its column fragments could not be parsed
    #[error("malformed schema ({reason}) in: {segment}")]
    MalformedSchema { segment: String, reason: String },

    #[error("schema file not found or unreadable: {path:?}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn malformed(segment: &str, reason: impl Into<String>) -> Self {
        Error::MalformedSchema {
            segment: segment.trim().to_string(),
            reason: reason.into(),
        }
    }
}
