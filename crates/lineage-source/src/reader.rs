//! Record file reader
//!
//! Record files are small INI-style documents:
//!
//! ```text
//! [panda]
//! _id = 1
//! en.name = Harumaki
//! children = none
//! ```
//!
//! Keys are case-folded to lowercase, values are trimmed, full-line `#` and
//! `;` comments are skipped and indented lines continue the previous value.

use std::collections::HashSet;
use std::path::Path;

use lineage_core::{EntityKind, Record};

use crate::error::{SourceError, SourceResult};

/// Read the record of `kind` from a file
pub fn read_record(path: &Path, kind: EntityKind) -> SourceResult<Record> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_record(&text, path, kind)
}

/// Parse the `[zoo]` or `[panda]` section of a record file
///
/// Other sections are checked for syntax but their fields are ignored.
pub fn parse_record(text: &str, path: &Path, kind: EntityKind) -> SourceResult<Record> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let wanted = kind.section();

    let mut record = Record::new(path, kind);
    let mut sections: HashSet<String> = HashSet::new();
    let mut keys: HashSet<String> = HashSet::new();
    let mut section: Option<String> = None;
    // Index of the field a continuation line appends to
    let mut last_field: Option<usize> = None;
    let mut continuing = false;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continuing = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = line.starts_with(char::is_whitespace);
        if indented && continuing {
            if let Some(i) = last_field {
                let value = &mut record.fields[i].1;
                value.push('\n');
                value.push_str(trimmed);
            }
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = name.trim().to_string();
            if !sections.insert(name.clone()) {
                return Err(SourceError::DuplicateSection {
                    path: path.to_path_buf(),
                    line: line_no,
                    section: name,
                });
            }
            keys.clear();
            section = Some(name);
            continuing = false;
            continue;
        }

        let Some(current) = section.as_deref() else {
            return Err(SourceError::Syntax {
                path: path.to_path_buf(),
                line: line_no,
                message: "field before any [section] header".to_string(),
            });
        };

        let Some(split) = trimmed.find(|c: char| c == '=' || c == ':') else {
            return Err(SourceError::Syntax {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("expected `key = value`, found {:?}", trimmed),
            });
        };
        let key = trimmed[..split].trim().to_lowercase();
        let value = trimmed[split + 1..].trim();
        if key.is_empty() {
            return Err(SourceError::Syntax {
                path: path.to_path_buf(),
                line: line_no,
                message: "empty key".to_string(),
            });
        }
        if !keys.insert(key.clone()) {
            return Err(SourceError::DuplicateKey {
                path: path.to_path_buf(),
                line: line_no,
                section: current.to_string(),
                key,
            });
        }

        continuing = true;
        if current == wanted {
            record.push(key, value);
            last_field = Some(record.fields.len() - 1);
        } else {
            last_field = None;
        }
    }

    if !sections.contains(wanted) {
        return Err(SourceError::MissingSection {
            path: path.to_path_buf(),
            section: wanted.to_string(),
        });
    }
    Ok(record)
}
