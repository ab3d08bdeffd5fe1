//! Dataset validators
//!
//! Checks that need a complete import phase: identifier uniqueness,
//! resolution of deferred edge endpoints, the shape of the family tree and
//! the chronology of parents and children.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Vertex, VertexId};
use crate::record::EntityKind;
use crate::schema::{BIRTHDAY_FIELD, DEATH_FIELD};
use crate::store::GraphStore;
use crate::validate::parse_date;

/// Reject any identifier shared by more than one vertex of a namespace
pub fn check_duplicate_ids(store: &GraphStore, kind: EntityKind) -> Result<()> {
    let vertices = match kind {
        EntityKind::Zoo => store.zoos(),
        EntityKind::Panda => store.pandas(),
    };
    let files = match kind {
        EntityKind::Zoo => store.zoo_files(),
        EntityKind::Panda => store.panda_files(),
    };

    let mut seen: HashMap<VertexId, Vec<usize>> = HashMap::new();
    let mut order = Vec::new();
    for (index, vertex) in vertices.iter().enumerate() {
        let indices = seen.entry(vertex.id).or_default();
        if indices.is_empty() {
            order.push(vertex.id);
        }
        indices.push(index);
    }

    // Report the first duplicated id in import order
    for id in order {
        let indices = &seen[&id];
        if indices.len() > 1 {
            let entities = indices
                .iter()
                .map(|&i| {
                    let name = vertices[i].get(crate::schema::NAME_FIELD).unwrap_or("?");
                    format!("{} ({})", name, files[i].display())
                })
                .collect();
            return Err(Error::DuplicateId {
                id: id.to_string(),
                entities,
            });
        }
    }
    Ok(())
}

/// Resolve every edge endpoint against the completed vertex set
///
/// Zoo endpoints must name an imported zoo and family children an imported
/// animal.
pub fn check_edge_endpoints(store: &GraphStore) -> Result<()> {
    let zoos: HashSet<VertexId> = store.zoos().iter().map(|v| v.id).collect();
    let pandas: HashSet<VertexId> = store.pandas().iter().map(|v| v.id).collect();

    for edge in store.edges() {
        for endpoint in [edge.source, edge.target] {
            let known = if endpoint.is_zoo() {
                zoos.contains(&endpoint)
            } else {
                pandas.contains(&endpoint)
            };
            if known {
                continue;
            }
            let path = store.source_of(&edge.source).map(Path::to_path_buf).unwrap_or_default();
            return Err(if edge.is_family() {
                Error::UnknownChild {
                    path,
                    parent: edge.source.to_string(),
                    child: endpoint.to_string(),
                }
            } else {
                Error::UnknownZoo {
                    path,
                    field: edge.label.clone(),
                    value: endpoint.number().to_string(),
                }
            });
        }
    }
    Ok(())
}

/// Check that family edges form a tree of ancestry
///
/// - a parent lists each child at most once
/// - a child has at most `max_parents` distinct parents
/// - no animal is its own ancestor
///
/// A parent is a panda record listing the child. Dam and sire records both
/// list their litter, so the usual limit is two; `max_parents = 1` enforces
/// a single claiming record per child.
pub fn check_family_tree(store: &GraphStore, max_parents: usize) -> Result<()> {
    let mut parents_of: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
    let mut children_of: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();

    for edge in store.family_edges() {
        let parents = parents_of.entry(edge.target).or_default();
        if parents.contains(&edge.source) {
            return Err(Error::DuplicateChild {
                path: store.source_of(&edge.source).map(Path::to_path_buf).unwrap_or_default(),
                parent: store.describe(&edge.source),
                child: edge.target.to_string(),
            });
        }
        parents.push(edge.source);
        children_of.entry(edge.source).or_default().push(edge.target);
    }

    if let Some((child, parents)) = parents_of.iter().find(|(_, p)| p.len() > max_parents) {
        return Err(Error::TooManyParents {
            child: store.describe(child),
            parents: parents.iter().map(|p| store.describe(p)).collect(),
            max: max_parents,
        });
    }

    if let Some(cycle) = find_cycle(&children_of) {
        return Err(Error::Cycle {
            path: cycle.iter().map(|id| store.describe(id)).collect(),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first search for a directed cycle; returns it closed (first == last)
fn find_cycle(children_of: &BTreeMap<VertexId, Vec<VertexId>>) -> Option<Vec<VertexId>> {
    let mut marks: HashMap<VertexId, Mark> = HashMap::new();

    for &root in children_of.keys() {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::Visiting);
        let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];

        while let Some(&(node, index)) = stack.last() {
            let next = children_of.get(&node).and_then(|c| c.get(index)).copied();
            let Some(child) = next else {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            match marks.get(&child) {
                Some(Mark::Visiting) => {
                    let start = stack.iter().position(|(n, _)| *n == child).unwrap_or(0);
                    let mut cycle: Vec<VertexId> = stack[start..].iter().map(|(n, _)| *n).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(child, Mark::Visiting);
                    stack.push((child, 0));
                }
            }
        }
    }
    None
}

fn date_of<'a>(vertex: &'a Vertex, field: &str) -> Option<(&'a str, NaiveDate)> {
    let raw = vertex.get(field)?;
    parse_date(raw).map(|date| (raw, date))
}

/// Check birth and death dates across the family tree
///
/// - an animal does not die before it is born
/// - a child is not born before its parent
/// - a child is not born after its parent died
///
/// Pairs where either date is unknown are skipped.
pub fn check_dates(store: &GraphStore) -> Result<()> {
    let pandas: HashMap<VertexId, &Vertex> = store.pandas().iter().map(|v| (v.id, v)).collect();

    for vertex in store.pandas() {
        if let (Some((birthday, born)), Some((death, died))) = (
            date_of(vertex, BIRTHDAY_FIELD),
            date_of(vertex, DEATH_FIELD),
        ) {
            if died < born {
                return Err(Error::DeathBeforeBirth {
                    entity: store.describe(&vertex.id),
                    birthday: birthday.to_string(),
                    death: death.to_string(),
                });
            }
        }
    }

    for edge in store.family_edges() {
        let (Some(parent), Some(child)) = (pandas.get(&edge.source), pandas.get(&edge.target))
        else {
            continue;
        };
        let Some((child_birthday, child_born)) = date_of(child, BIRTHDAY_FIELD) else {
            continue;
        };

        if let Some((parent_birthday, parent_born)) = date_of(parent, BIRTHDAY_FIELD) {
            if child_born < parent_born {
                return Err(Error::BornBeforeParent {
                    parent: store.describe(&parent.id),
                    parent_birthday: parent_birthday.to_string(),
                    child: store.describe(&child.id),
                    child_birthday: child_birthday.to_string(),
                });
            }
        }

        if let Some((parent_death, parent_died)) = date_of(parent, DEATH_FIELD) {
            if child_born > parent_died {
                return Err(Error::BornAfterParentDeath {
                    parent: store.describe(&parent.id),
                    parent_death: parent_death.to_string(),
                    child: store.describe(&child.id),
                    child_birthday: child_birthday.to_string(),
                });
            }
        }
    }
    Ok(())
}
