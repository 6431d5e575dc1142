use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid separator {0:?}: must be non-empty and contain no Myanmar characters")]
    InvalidSeparator(String),

    #[error("invalid category symbol {symbol:?} at position {position}")]
    InvalidCategorySymbol { symbol: char, position: usize },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("failed to serialize output record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
