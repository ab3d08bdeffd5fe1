//! Zoo and panda importers: raw records into vertices and edges

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Edge, Vertex, VertexId};
use crate::record::{EntityKind, Record};
use crate::schema::{FieldKind, ID_FIELD, NAME_FIELD};
use crate::store::GraphStore;
use crate::validate::{check_date, check_gender, check_name, check_zoo_reference, parse_children};

fn expect_kind(record: &Record, expected: EntityKind) -> Result<()> {
    if record.kind != expected {
        return Err(Error::WrongEntity {
            path: record.path.clone(),
            expected: expected.to_string(),
            found: record.kind.to_string(),
        });
    }
    Ok(())
}

fn required<'a>(record: &'a Record, field: &str) -> Result<&'a str> {
    record.get(field).ok_or_else(|| Error::MissingField {
        path: record.path.clone(),
        field: field.to_string(),
    })
}

fn record_id(record: &Record) -> Result<VertexId> {
    let raw = required(record, ID_FIELD)?;
    VertexId::parse(record.kind, raw).ok_or_else(|| Error::InvalidId {
        path: record.path.clone(),
        field: ID_FIELD.to_string(),
        value: raw.to_string(),
    })
}

/// Convert a zoo record into a zoo vertex and append it to the store
pub(crate) fn import_zoo(store: &mut GraphStore, record: &Record) -> Result<VertexId> {
    expect_kind(record, EntityKind::Zoo)?;
    let id = record_id(record)?;

    let mut vertex = Vertex::new(id);
    for (field, value) in &record.fields {
        match FieldKind::classify(field) {
            FieldKind::Id => {}
            FieldKind::Name => vertex.insert(field, check_name(value, field, &record.path)?),
            _ => vertex.insert(field, value),
        }
    }

    tracing::debug!("Imported zoo {} from {:?}", id, record.path);
    store.push_zoo(vertex, &record.path);
    Ok(id)
}

/// Convert a panda record into an animal vertex plus its edges
///
/// Zoo references must resolve against `zoos`. Child ids are kept as
/// provisional family edges and resolved once every panda is imported.
pub(crate) fn import_panda(
    store: &mut GraphStore,
    record: &Record,
    zoos: &HashSet<VertexId>,
) -> Result<VertexId> {
    expect_kind(record, EntityKind::Panda)?;
    let id = record_id(record)?;
    let name = required(record, NAME_FIELD)?;
    let path = &record.path;

    let mut vertex = Vertex::new(id);
    let mut edges = Vec::new();

    for (field, value) in &record.fields {
        match FieldKind::classify(field) {
            FieldKind::Id => {}
            FieldKind::Name => vertex.insert(field, check_name(value, field, path)?),
            FieldKind::Gender => vertex.insert(field, check_gender(value, field, path)?.as_str()),
            FieldKind::Date => vertex.insert(field, check_date(value, field, path)?),
            FieldKind::ZooReference => {
                let zoo = check_zoo_reference(value, field, path, zoos)?;
                edges.push(Edge::new(id, zoo, field.as_str()));
            }
            FieldKind::Children => {
                for child in parse_children(value, field, path)? {
                    edges.push(Edge::family(id, child));
                }
            }
            FieldKind::Passthrough => vertex.insert(field, value),
        }
    }

    tracing::debug!(
        "Imported panda {} ({}) with {} edges from {:?}",
        id,
        name,
        edges.len(),
        path
    );
    store.push_panda(vertex, edges, path);
    Ok(id)
}
