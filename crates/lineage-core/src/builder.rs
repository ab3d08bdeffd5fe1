//! Two-phase graph builder
//!
//! Zoos are imported and validated first, then animals. Each phase is its
//! own type, so animals can't be imported before the zoo set is complete and
//! only a graph that passed every dataset check can reach the exporter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::dataset::{check_dates, check_duplicate_ids, check_edge_endpoints, check_family_tree};
use crate::error::Result;
use crate::importer::{import_panda, import_zoo};
use crate::model::VertexId;
use crate::record::{EntityKind, Record};
use crate::store::GraphStore;

/// Default number of distinct parents a child may have (dam and sire)
pub const DEFAULT_MAX_PARENTS: usize = 2;

/// Tunables for the dataset checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Maximum distinct parent records that may list the same child
    #[serde(default = "default_max_parents")]
    pub max_parents: usize,
}

fn default_max_parents() -> usize {
    DEFAULT_MAX_PARENTS
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_parents: DEFAULT_MAX_PARENTS,
        }
    }
}

impl BuildOptions {
    pub fn with_max_parents(mut self, max_parents: usize) -> Self {
        self.max_parents = max_parents;
        self
    }
}

/// First phase: importing zoo records
#[derive(Debug, Default)]
pub struct ZooPhase {
    store: GraphStore,
    options: BuildOptions,
}

impl ZooPhase {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            store: GraphStore::new(),
            options,
        }
    }

    /// Import one zoo record
    pub fn import_zoo(&mut self, record: &Record) -> Result<VertexId> {
        import_zoo(&mut self.store, record)
    }

    /// Validate the complete zoo set and move on to animals
    pub fn finish(self) -> Result<PandaPhase> {
        check_duplicate_ids(&self.store, EntityKind::Zoo)?;
        tracing::info!("Imported {} zoos", self.store.zoos().len());

        let zoo_ids = self.store.zoos().iter().map(|z| z.id).collect();
        Ok(PandaPhase {
            store: self.store,
            options: self.options,
            zoo_ids,
        })
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }
}

/// Second phase: importing panda records against a validated zoo set
#[derive(Debug)]
pub struct PandaPhase {
    store: GraphStore,
    options: BuildOptions,
    zoo_ids: HashSet<VertexId>,
}

impl PandaPhase {
    /// Import one panda record
    pub fn import_panda(&mut self, record: &Record) -> Result<VertexId> {
        import_panda(&mut self.store, record, &self.zoo_ids)
    }

    /// Run every animal dataset check and seal the graph
    pub fn finish(self) -> Result<LineageGraph> {
        let store = self.store;
        check_duplicate_ids(&store, EntityKind::Panda)?;
        check_edge_endpoints(&store)?;
        check_family_tree(&store, self.options.max_parents)?;
        check_dates(&store)?;

        let referenced: HashSet<VertexId> = store
            .edges()
            .iter()
            .map(|e| e.target)
            .filter(VertexId::is_zoo)
            .collect();
        for zoo in store.zoos().iter().filter(|z| !referenced.contains(&z.id)) {
            tracing::warn!("Zoo {} is not referenced by any panda", store.describe(&zoo.id));
        }

        tracing::info!(
            "Imported {} pandas with {} edges",
            store.pandas().len(),
            store.edges().len()
        );
        Ok(LineageGraph { store })
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }
}

/// A fully imported and validated lineage graph
#[derive(Debug, Clone)]
pub struct LineageGraph {
    store: GraphStore,
}

impl LineageGraph {
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn zoo_count(&self) -> usize {
        self.store.zoos().len()
    }

    pub fn panda_count(&self) -> usize {
        self.store.pandas().len()
    }
}

/// Build a graph from complete zoo and panda record sets
pub fn build<'a, Z, P>(zoos: Z, pandas: P, options: BuildOptions) -> Result<LineageGraph>
where
    Z: IntoIterator<Item = &'a Record>,
    P: IntoIterator<Item = &'a Record>,
{
    let mut phase = ZooPhase::new(options);
    for record in zoos {
        phase.import_zoo(record)?;
    }
    let mut phase = phase.finish()?;
    for record in pandas {
        phase.import_panda(record)?;
    }
    phase.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    fn zoo(id: &str) -> Record {
        Record::new(format!("zoos/a/{}.txt", id), EntityKind::Zoo)
            .with_field("_id", id)
            .with_field("en.name", format!("Zoo {}", id))
    }

    fn panda(id: &str) -> Record {
        Record::new(format!("pandas/a/{}.txt", id), EntityKind::Panda)
            .with_field("_id", id)
            .with_field("en.name", format!("Panda {}", id))
    }

    #[test]
    fn test_build_end_to_end() {
        let zoos = vec![zoo("5")];
        let pandas = vec![
            panda("1")
                .with_field("gender", "f")
                .with_field("birthplace", "5")
                .with_field("children", "2"),
            panda("2").with_field("gender", "m").with_field("children", "none"),
        ];

        let graph = build(&zoos, &pandas, BuildOptions::default()).unwrap();

        assert_eq!(graph.zoo_count(), 1);
        assert_eq!(graph.panda_count(), 2);
        assert_eq!(graph.store().edges().len(), 2);
    }

    #[test]
    fn test_duplicate_zoo_stops_before_pandas() {
        let mut phase = ZooPhase::new(BuildOptions::default());
        phase.import_zoo(&zoo("5")).unwrap();
        phase.import_zoo(&zoo("5")).unwrap();

        let err = phase.finish().unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn test_duplicate_panda_rejected() {
        let zoos = vec![zoo("5")];
        let pandas = vec![panda("1"), panda("1").with_field("gender", "m")];

        let err = build(&zoos, &pandas, BuildOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Identifier);
    }

    #[test]
    fn test_unknown_dates_accepted() {
        let zoos: Vec<Record> = vec![];
        let pandas = vec![
            panda("1")
                .with_field("birthday", "unknown")
                .with_field("children", "2"),
            panda("2")
                .with_field("birthday", "2015/1/1")
                .with_field("death", "unknown"),
        ];

        let graph = build(&zoos, &pandas, BuildOptions::default()).unwrap();
        assert_eq!(graph.store().pandas()[0].get("birthday"), Some("unknown"));
        assert_eq!(graph.store().family_edges().count(), 1);
    }

    #[test]
    fn test_children_may_be_imported_later() {
        let zoos: Vec<Record> = vec![];
        let pandas = vec![panda("1").with_field("children", "3"), panda("3")];

        let graph = build(&zoos, &pandas, BuildOptions::default()).unwrap();
        assert_eq!(graph.store().family_edges().count(), 1);
    }

    #[test]
    fn test_strict_single_parent() {
        let zoos: Vec<Record> = vec![];
        let pandas = vec![
            panda("1").with_field("children", "3"),
            panda("2").with_field("children", "3"),
            panda("3"),
        ];

        assert!(build(&zoos, &pandas, BuildOptions::default()).is_ok());
        let err = build(&zoos, &pandas, BuildOptions::default().with_max_parents(1)).unwrap_err();
        assert!(matches!(err, Error::TooManyParents { .. }));
    }

    #[test]
    fn test_options_deserialize_default() {
        let options: BuildOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_parents, DEFAULT_MAX_PARENTS);
    }
}
