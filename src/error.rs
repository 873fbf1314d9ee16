// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::graph::validator::StructuralViolation;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid hierarchy: {0}")]
    StructuralInvalid(#[from] StructuralViolation),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed experiment file {}: {message}", .path.display())]
    ConfigFile { path: PathBuf, message: String },
}

impl RankError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Maps a failed open/read into the error kind the pipeline reports.
    pub(crate) fn from_io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::Io { source, path }
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};
    use std::path::Path;

    #[test]
    fn test_from_io_keeps_not_found_distinct() {
        let missing = RankError::from_io(Error::from(ErrorKind::NotFound), "tree.txt");
        assert!(matches!(missing, RankError::InputNotFound { ref path } if path == Path::new("tree.txt")));

        let denied = RankError::from_io(Error::from(ErrorKind::PermissionDenied), "tree.txt");
        assert!(matches!(denied, RankError::Io { .. }));
        assert!(denied.to_string().contains("tree.txt"));
    }
}
