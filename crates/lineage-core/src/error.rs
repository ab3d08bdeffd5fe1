//! Error types for the lineage engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the engine's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], used for reporting and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DateFormat,
    GenderFormat,
    NameFormat,
    Identifier,
    Cycle,
    Chronology,
    Record,
    Io,
    Serialization,
}

/// Lineage build errors
///
/// Every variant is fatal: the build stops at the first one raised.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: invalid YYYY/MM/DD date in {field}: {value}", .path.display())]
    DateFormat {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("{}: unsupported gender in {field}: {value}", .path.display())]
    GenderFormat {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("{}: {field} name too long ({len} chars, max {max}): {value}", .path.display())]
    NameFormat {
        path: PathBuf,
        field: String,
        value: String,
        len: usize,
        max: usize,
    },

    #[error("{}: invalid identifier in {field}: {value:?}", .path.display())]
    InvalidId {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("{}: zoo id doesn't exist in {field}: {value}", .path.display())]
    UnknownZoo {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("{}: invalid children list in {field}: {value}", .path.display())]
    InvalidChildren {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("duplicate id {id} shared by: {}", .entities.join(", "))]
    DuplicateId { id: String, entities: Vec<String> },

    #[error("{}: child id {child} of {parent} doesn't exist", .path.display())]
    UnknownChild {
        path: PathBuf,
        parent: String,
        child: String,
    },

    #[error("{}: {parent} lists child {child} more than once", .path.display())]
    DuplicateChild {
        path: PathBuf,
        parent: String,
        child: String,
    },

    #[error("child {child} is claimed by {} parents (max {max}): {}", .parents.len(), .parents.join(", "))]
    TooManyParents {
        child: String,
        parents: Vec<String>,
        max: usize,
    },

    #[error("family cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("{entity}: death {death} is before birthday {birthday}")]
    DeathBeforeBirth {
        entity: String,
        birthday: String,
        death: String,
    },

    #[error("{child} born {child_birthday}, before parent {parent} born {parent_birthday}")]
    BornBeforeParent {
        parent: String,
        parent_birthday: String,
        child: String,
        child_birthday: String,
    },

    #[error("{child} born {child_birthday}, after parent {parent} died {parent_death}")]
    BornAfterParentDeath {
        parent: String,
        parent_death: String,
        child: String,
        child_birthday: String,
    },

    #[error("{}: missing required field {field}", .path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("{}: expected a [{expected}] record, found [{found}]", .path.display())]
    WrongEntity {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The error kind this variant belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DateFormat { .. } => ErrorKind::DateFormat,
            Self::GenderFormat { .. } => ErrorKind::GenderFormat,
            Self::NameFormat { .. } => ErrorKind::NameFormat,
            Self::InvalidId { .. }
            | Self::UnknownZoo { .. }
            | Self::InvalidChildren { .. }
            | Self::DuplicateId { .. }
            | Self::UnknownChild { .. }
            | Self::DuplicateChild { .. }
            | Self::TooManyParents { .. } => ErrorKind::Identifier,
            Self::Cycle { .. } => ErrorKind::Cycle,
            Self::DeathBeforeBirth { .. }
            | Self::BornBeforeParent { .. }
            | Self::BornAfterParentDeath { .. } => ErrorKind::Chronology,
            Self::MissingField { .. } | Self::WrongEntity { .. } => ErrorKind::Record,
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
}
