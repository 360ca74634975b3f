//! Error types for statistics persistence.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A statistics line is not `<key> <count>`.
    #[error("{path}:{line}: expected `<key> <count>`, found `{content}`")]
    Format {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

impl StatsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
