//! Lineage Core - Graph construction and validation engine
//!
//! Turns zoo and panda records into a directed property graph of animals,
//! the zoos they live at and their family relationships, checks the whole
//! dataset for consistency and exports it as a deterministic JSON document.

pub mod builder;
pub mod dataset;
pub mod error;
pub mod export;
mod importer;
pub mod model;
pub mod record;
pub mod schema;
pub mod store;
pub mod validate;

pub use builder::{build, BuildOptions, LineageGraph, PandaPhase, ZooPhase, DEFAULT_MAX_PARENTS};
pub use error::{Error, ErrorKind, Result};
pub use export::{to_json, write_json, ExportDocument, ExportOptions, Totals};
pub use model::{Edge, Gender, Vertex, VertexId, FAMILY_LABEL};
pub use record::{EntityKind, Record};
pub use schema::FieldKind;
pub use store::GraphStore;
pub use validate::MAX_NAME_LEN;
