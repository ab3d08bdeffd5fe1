//! Vertex (animal or zoo) and edge types of the lineage graph

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::record::EntityKind;

/// Label of parent -> child edges
pub const FAMILY_LABEL: &str = "family";

/// Identifier of a vertex, tagged with its namespace
///
/// Exported with the sign encoding used by the dataset: zoos are the
/// negation of their declared id, animals keep their declared id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexId {
    Zoo(u64),
    Panda(u64),
}

impl VertexId {
    /// Parse a declared (unsigned, positive) identifier into the namespace of `kind`
    pub fn parse(kind: EntityKind, raw: &str) -> Option<Self> {
        let number = raw.trim().parse::<u64>().ok().filter(|n| *n > 0)?;
        Some(match kind {
            EntityKind::Zoo => Self::Zoo(number),
            EntityKind::Panda => Self::Panda(number),
        })
    }

    pub fn is_zoo(&self) -> bool {
        matches!(self, Self::Zoo(_))
    }

    /// The declared identifier, without namespace
    pub fn number(&self) -> u64 {
        match self {
            Self::Zoo(n) | Self::Panda(n) => *n,
        }
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zoo(n) => write!(f, "-{}", n),
            Self::Panda(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for VertexId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical gender values stored in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    const MALE: [&'static str; 5] = ["m", "M", "male", "Male", "オス"];
    const FEMALE: [&'static str; 5] = ["f", "F", "female", "Female", "メス"];

    /// Recognize one of the accepted spellings
    pub fn parse(s: &str) -> Option<Self> {
        if Self::MALE.contains(&s) {
            Some(Self::Male)
        } else if Self::FEMALE.contains(&s) {
            Some(Self::Female)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// A node in the graph: one animal or one zoo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,

    /// Every other field, keyed by field name
    pub fields: BTreeMap<String, String>,
}

impl Vertex {
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl Serialize for Vertex {
    /// One flat object with `_id` merged into the sorted field map
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let id = self.id.to_string();
        let mut map: BTreeMap<&str, &str> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        map.insert(crate::schema::ID_FIELD, &id);
        serializer.collect_map(map)
    }
}

/// A directed, labeled relation between two vertices
///
/// Fields are declared in the sorted order of their exported keys.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Edge {
    #[serde(rename = "_in")]
    pub target: VertexId,

    #[serde(rename = "_label")]
    pub label: String,

    #[serde(rename = "_out")]
    pub source: VertexId,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId, label: impl Into<String>) -> Self {
        Self {
            target,
            label: label.into(),
            source,
        }
    }

    /// Parent -> child edge
    pub fn family(parent: VertexId, child: VertexId) -> Self {
        Self::new(parent, child, FAMILY_LABEL)
    }

    pub fn is_family(&self) -> bool {
        self.label == FAMILY_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_sign_encoding() {
        assert_eq!(VertexId::Zoo(5).to_string(), "-5");
        assert_eq!(VertexId::Panda(100).to_string(), "100");
    }

    #[test]
    fn test_vertex_id_parse() {
        assert_eq!(VertexId::parse(EntityKind::Zoo, "5"), Some(VertexId::Zoo(5)));
        assert_eq!(
            VertexId::parse(EntityKind::Panda, " 42 "),
            Some(VertexId::Panda(42))
        );
        assert_eq!(VertexId::parse(EntityKind::Panda, "0"), None);
        assert_eq!(VertexId::parse(EntityKind::Panda, "-3"), None);
        assert_eq!(VertexId::parse(EntityKind::Zoo, "abc"), None);
        assert_eq!(VertexId::parse(EntityKind::Zoo, ""), None);
    }

    #[test]
    fn test_gender_vocabulary() {
        for s in ["m", "M", "male", "Male", "オス"] {
            assert_eq!(Gender::parse(s), Some(Gender::Male));
        }
        for s in ["f", "F", "female", "Female", "メス"] {
            assert_eq!(Gender::parse(s), Some(Gender::Female));
        }
        assert_eq!(Gender::parse("MALE"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_vertex_serializes_flat_and_sorted() {
        let vertex = Vertex::new(VertexId::Zoo(5))
            .with_field("en.name", "Sample Zoo")
            .with_field("en.address", "1 Zoo Road");

        let json = serde_json::to_string(&vertex).unwrap();
        assert_eq!(
            json,
            r#"{"_id":"-5","en.address":"1 Zoo Road","en.name":"Sample Zoo"}"#
        );
    }

    #[test]
    fn test_edge_serialization() {
        let edge = Edge::new(VertexId::Panda(100), VertexId::Zoo(5), "birthplace");
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"_in":"-5","_label":"birthplace","_out":"100"}"#);
        assert!(!edge.is_family());
        assert!(Edge::family(VertexId::Panda(1), VertexId::Panda(2)).is_family());
    }
}
