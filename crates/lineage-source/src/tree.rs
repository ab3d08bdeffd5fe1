//! Record tree discovery
//!
//! Records live one per file in subdirectories of a root directory
//! (`zoos/<group>/<file>.txt`, `pandas/<group>/<file>.txt`). Files are
//! listed in sorted order at every level so builds are reproducible.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use lineage_core::{EntityKind, Record};

use crate::error::{SourceError, SourceResult};
use crate::reader::read_record;

/// Default record file extension
pub const DEFAULT_EXTENSION: &str = "txt";

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

/// List record files under `root`
///
/// Only files inside a subdirectory of `root` count; files directly under
/// `root` are skipped. Symlinks are not followed.
pub fn discover(root: &Path, extension: &str) -> SourceResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SourceError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            SourceError::Walk { path, source: e }
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        } else {
            tracing::trace!("Skipping {:?}", entry.path());
        }
    }

    tracing::debug!("Found {} record files under {:?}", files.len(), root);
    Ok(files)
}

/// Read every record of `kind` under `root`, in discovery order
pub fn load_tree(root: &Path, kind: EntityKind, extension: &str) -> SourceResult<Vec<Record>> {
    let records = discover(root, extension)?
        .iter()
        .map(|path| read_record(path, kind))
        .collect::<SourceResult<Vec<_>>>()?;

    tracing::info!("Read {} {} records from {:?}", records.len(), kind, root);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "b/2.txt", "");
        write(root, "a/2.txt", "");
        write(root, "a/1.TXT", "");
        write(root, "a/notes.md", "");
        write(root, "top.txt", "");

        let files = discover(root, "txt").unwrap();
        let rel: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(rel, vec!["a/1.TXT", "a/2.txt", "b/2.txt"]);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("nope"), "txt").unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory { .. }));
    }

    #[test]
    fn test_load_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "0001/harumaki.txt", "[panda]\n_id = 1\nen.name = Harumaki\n");
        write(root, "0002/karin.txt", "[panda]\n_id = 10\nen.name = Karin\n");

        let records = load_tree(root, EntityKind::Panda, ".txt").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("en.name"), Some("Harumaki"));
        assert_eq!(records[1].get("_id"), Some("10"));
        assert!(records[1].path.ends_with("0002/karin.txt"));
    }

    #[test]
    fn test_load_tree_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/broken.txt", "[zoo]\n_id = 1\n");

        let err = load_tree(dir.path(), EntityKind::Panda, "txt").unwrap_err();
        assert!(err.to_string().contains("broken.txt"));
    }
}
