//! Record source error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for record source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors raised while locating or reading record files
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("record directory {} does not exist or is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("{}:{line}: {message}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}:{line}: duplicate section [{section}]", .path.display())]
    DuplicateSection {
        path: PathBuf,
        line: usize,
        section: String,
    },

    #[error("{}:{line}: duplicate key {key} in [{section}]", .path.display())]
    DuplicateKey {
        path: PathBuf,
        line: usize,
        section: String,
        key: String,
    },

    #[error("{}: missing [{section}] section", .path.display())]
    MissingSection { path: PathBuf, section: String },
}
