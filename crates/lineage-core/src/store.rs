//! Graph store: the accumulated vertices and edges of one build

use std::path::{Path, PathBuf};

use crate::model::{Edge, Vertex, VertexId};
use crate::schema::NAME_FIELD;

/// Vertices and edges accumulated during import
///
/// Append-only. Zoos and animals are kept apart so each namespace can be
/// validated on its own; source paths are index-aligned with the vertices.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    zoos: Vec<Vertex>,
    pandas: Vec<Vertex>,
    edges: Vec<Edge>,
    zoo_files: Vec<PathBuf>,
    panda_files: Vec<PathBuf>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_zoo(&mut self, vertex: Vertex, path: &Path) {
        self.zoos.push(vertex);
        self.zoo_files.push(path.to_path_buf());
    }

    pub(crate) fn push_panda(&mut self, vertex: Vertex, edges: Vec<Edge>, path: &Path) {
        self.pandas.push(vertex);
        self.edges.extend(edges);
        self.panda_files.push(path.to_path_buf());
    }

    pub fn zoos(&self) -> &[Vertex] {
        &self.zoos
    }

    pub fn pandas(&self) -> &[Vertex] {
        &self.pandas
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn zoo_files(&self) -> &[PathBuf] {
        &self.zoo_files
    }

    pub fn panda_files(&self) -> &[PathBuf] {
        &self.panda_files
    }

    /// All vertices: zoos first, then animals, each in import order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.zoos.iter().chain(self.pandas.iter())
    }

    pub fn family_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.is_family())
    }

    /// Source file a vertex was imported from
    pub fn source_of(&self, id: &VertexId) -> Option<&Path> {
        let (vertices, files) = if id.is_zoo() {
            (&self.zoos, &self.zoo_files)
        } else {
            (&self.pandas, &self.panda_files)
        };
        vertices
            .iter()
            .position(|v| v.id == *id)
            .map(|i| files[i].as_path())
    }

    /// Human-readable label for diagnostics: `id (name, path)`
    pub fn describe(&self, id: &VertexId) -> String {
        let vertex = if id.is_zoo() {
            self.zoos.iter().find(|v| v.id == *id)
        } else {
            self.pandas.iter().find(|v| v.id == *id)
        };
        let name = vertex.and_then(|v| v.get(NAME_FIELD));
        match (name, self.source_of(id)) {
            (Some(name), Some(path)) => format!("{} ({}, {})", id, name, path.display()),
            (None, Some(path)) => format!("{} ({})", id, path.display()),
            _ => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_zoos_first() {
        let mut store = GraphStore::new();
        store.push_panda(
            Vertex::new(VertexId::Panda(1)),
            vec![],
            Path::new("pandas/a/1.txt"),
        );
        store.push_zoo(
            Vertex::new(VertexId::Zoo(5)).with_field("en.name", "Sample Zoo"),
            Path::new("zoos/a/5.txt"),
        );

        let ids: Vec<VertexId> = store.vertices().map(|v| v.id).collect();
        assert_eq!(ids, vec![VertexId::Zoo(5), VertexId::Panda(1)]);
        assert_eq!(
            store.source_of(&VertexId::Zoo(5)),
            Some(Path::new("zoos/a/5.txt"))
        );
        assert_eq!(store.source_of(&VertexId::Panda(5)), None);
    }

    #[test]
    fn test_describe() {
        let mut store = GraphStore::new();
        store.push_zoo(
            Vertex::new(VertexId::Zoo(5)).with_field("en.name", "Sample Zoo"),
            Path::new("zoos/a/5.txt"),
        );

        assert_eq!(
            store.describe(&VertexId::Zoo(5)),
            "-5 (Sample Zoo, zoos/a/5.txt)"
        );
        assert_eq!(store.describe(&VertexId::Panda(7)), "7");
    }
}
