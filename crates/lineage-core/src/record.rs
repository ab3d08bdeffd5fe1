//! Raw records handed to the engine by the record source

use std::path::{Path, PathBuf};

/// The kind of entity a record declares through its section name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Zoo,
    Panda,
}

impl EntityKind {
    /// Section name declaring this kind in a record file
    pub fn section(&self) -> &'static str {
        match self {
            Self::Zoo => "zoo",
            Self::Panda => "panda",
        }
    }

    pub fn from_section(section: &str) -> Option<Self> {
        match section {
            "zoo" => Some(Self::Zoo),
            "panda" => Some(Self::Panda),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}

/// One file's worth of field/value data for a single entity
///
/// Fields keep the order they were declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// File the record was read from, for diagnostics
    pub path: PathBuf,

    /// Declared entity kind
    pub kind: EntityKind,

    /// Ordered (field name, value) pairs
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(path: impl Into<PathBuf>, kind: EntityKind) -> Self {
        Self {
            path: path.into(),
            kind,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value declared for a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
