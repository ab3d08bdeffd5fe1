//! Lineage Source - Record files for the lineage engine
//!
//! Locates zoo and panda record files in a directory tree and parses each
//! into an ordered [`lineage_core::Record`].

pub mod error;
pub mod reader;
pub mod tree;

pub use error::{SourceError, SourceResult};
pub use reader::{parse_record, read_record};
pub use tree::{discover, load_tree, DEFAULT_EXTENSION};
