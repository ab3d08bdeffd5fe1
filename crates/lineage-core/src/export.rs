//! JSON export of a validated lineage graph
//!
//! The document has three keys: `edges`, `totals` and `vertices`. Object keys
//! are emitted in sorted order and non-ASCII text is written as raw UTF-8,
//! so identical inputs always produce byte-identical output.

use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::builder::LineageGraph;
use crate::error::{Error, Result};
use crate::model::{Edge, Vertex};

/// Summary counts written under `totals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub pandas: usize,
    pub zoos: usize,
}

/// Export document. Fields are declared in sorted key order.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub edges: &'a [Edge],
    pub totals: Totals,
    pub vertices: Vec<&'a Vertex>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(graph: &'a LineageGraph) -> Self {
        let store = graph.store();
        Self {
            edges: store.edges(),
            totals: Totals {
                pandas: store.pandas().len(),
                zoos: store.zoos().len(),
            },
            vertices: store.vertices().collect(),
        }
    }
}

/// Output formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Indent the document instead of writing it on one line
    pub pretty: bool,
}

/// Serialize the graph to a JSON string
pub fn to_json(graph: &LineageGraph, options: ExportOptions) -> Result<String> {
    let document = ExportDocument::new(graph);
    let json = if options.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Write the graph to `path`
///
/// The document is written to a temporary file next to `path` and moved into
/// place once complete. On any failure the temporary file is removed and an
/// existing file at `path` is left untouched.
pub fn write_json(graph: &LineageGraph, path: &Path, options: ExportOptions) -> Result<Totals> {
    let io_err = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let document = ExportDocument::new(graph);
    let file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(file.as_file());
        if options.pretty {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }
        writer.flush().map_err(io_err)?;
    }
    file.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(
        "Wrote {} vertices and {} edges to {:?}",
        document.vertices.len(),
        document.edges.len(),
        path
    );
    Ok(document.totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build, BuildOptions};
    use crate::record::{EntityKind, Record};

    fn sample_graph() -> LineageGraph {
        let zoos = vec![Record::new("zoos/a/5.txt", EntityKind::Zoo)
            .with_field("_id", "5")
            .with_field("en.name", "Sample Zoo")];
        let pandas = vec![Record::new("pandas/a/100.txt", EntityKind::Panda)
            .with_field("_id", "100")
            .with_field("en.name", "Mochi")
            .with_field("jp.name", "もち")
            .with_field("gender", "f")
            .with_field("birthplace", "5")
            .with_field("children", "none")];
        build(&zoos, &pandas, BuildOptions::default()).unwrap()
    }

    #[test]
    fn test_to_json_document() {
        let json = to_json(&sample_graph(), ExportOptions::default()).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"edges":[{"_in":"-5","_label":"birthplace","_out":"100"}],"#,
                r#""totals":{"pandas":1,"zoos":1},"#,
                r#""vertices":[{"_id":"-5","en.name":"Sample Zoo"},"#,
                r#"{"_id":"100","en.name":"Mochi","gender":"Female","jp.name":"もち"}]}"#
            )
        );
    }

    #[test]
    fn test_keys_sorted_like_a_json_value() {
        // Re-serializing through serde_json::Value (sorted maps) must not change anything
        let json = to_json(&sample_graph(), ExportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }

    #[test]
    fn test_export_is_deterministic() {
        let first = to_json(&sample_graph(), ExportOptions { pretty: true }).unwrap();
        let second = to_json(&sample_graph(), ExportOptions { pretty: true }).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export").join("redpanda.json");

        let totals = write_json(&sample_graph(), &path, ExportOptions::default()).unwrap();

        assert_eq!(totals, Totals { pandas: 1, zoos: 1 });
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json(&sample_graph(), ExportOptions::default()).unwrap());

        // Nothing but the export is left behind
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
