//! Error types for buffer load and save operations

use std::io;
use std::path::PathBuf;

/// Errors surfaced by loading and saving document buffers
#[derive(Debug)]
pub enum DocumentError {
    /// The path given to a load does not exist
    NotFound(PathBuf),
    /// A save was attempted on a buffer with no associated file path
    NoPath,
    /// An empty path was given
    InvalidPath,
    /// The underlying read or write failed
    Io { path: PathBuf, source: io::Error },
}

impl DocumentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DocumentError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::NotFound(path) => write!(f, "File not found: {:?}", path),
            DocumentError::NoPath => write!(f, "No file path associated with buffer"),
            DocumentError::InvalidPath => write!(f, "File path is empty"),
            DocumentError::Io { path, source } => write!(f, "IO error on {:?}: {}", path, source),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_path() {
        let err = DocumentError::NotFound(PathBuf::from("/tmp/missing.txt"));
        assert!(err.to_string().contains("missing.txt"));

        let err = DocumentError::io(
            "/tmp/locked.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("locked.txt"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_exposes_source() {
        use std::error::Error;

        let err = DocumentError::io("/tmp/x", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(err.source().is_some());
        assert!(DocumentError::NoPath.source().is_none());
    }
}
