// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Conversion between the map-based editing form ([`GraphStore`]) and the
//! array-based wire form ([`Diagram`]) used by the native JSON file format.
//!
//! Serialization is where consistency gets repaired: registry defaults are
//! backfilled, handles are regenerated, orphaned handles and dangling arrows
//! are pruned (with a diagnostic), and internal bookkeeping keys are scrubbed
//! from arrow data. For a fixed store the output is fully deterministic.

use std::collections::BTreeMap;

use tracing::warn;

use crate::graph::handles::derive_handles;
use crate::graph::store::{GraphStore, HandleKey};
use crate::model::arrow::Arrow;
use crate::model::diagram::Diagram;
use crate::model::handle::{Handle, HandleDirection};
use crate::model::ids::{ArrowId, NodeId, PersonId};
use crate::model::node::Node;
use crate::model::person::Person;
use crate::registry::{default_node_data, node_type_config};

/// Keys the frontend stashes in arrow data during editing; never persisted.
const ARROW_DATA_INTERNAL_KEYS: [&str; 4] = ["id", "type", "_sourceNodeType", "_isFromConditionBranch"];

/// Projects the store into the wire form, repairing consistency on the way
/// out. `metadata` is left unset; callers that persist a named diagram attach
/// it afterwards.
pub fn serialize(store: &GraphStore) -> Diagram {
    let mut nodes = Vec::with_capacity(store.nodes().len());
    for node in store.nodes().values() {
        nodes.push(export_node(node));
    }

    // Regenerate the declared handle set for every live node, then let any
    // stored handle with the same id and direction win (it may carry an
    // explicit position).
    let mut handles: BTreeMap<HandleKey, Handle> = BTreeMap::new();
    for node in store.nodes().values() {
        for handle in derive_handles(&node.id, node.node_type) {
            handles.insert(handle.key(), handle);
        }
    }
    for handle in store.handles().values() {
        if store.nodes().contains_key(&handle.node_id) {
            handles.insert(handle.key(), handle.clone());
        } else {
            warn!(
                handle_id = %handle.id,
                node_id = %handle.node_id,
                "pruning orphaned handle: owning node no longer exists"
            );
        }
    }

    let mut arrows = Vec::with_capacity(store.arrows().len());
    for arrow in store.arrows().values() {
        let source_ok = handles.contains_key(&(arrow.source.clone(), HandleDirection::Output));
        let target_ok = handles.contains_key(&(arrow.target.clone(), HandleDirection::Input));
        if !source_ok || !target_ok {
            warn!(
                arrow_id = %arrow.id,
                source = %arrow.source,
                target = %arrow.target,
                "pruning dangling arrow: endpoint handle no longer exists"
            );
            continue;
        }
        arrows.push(export_arrow(arrow));
    }

    let persons = store.persons().values().map(export_person).collect();

    Diagram {
        nodes,
        handles: handles.into_values().collect(),
        arrows,
        persons,
        metadata: None,
    }
}

/// Rebuilds the map form from a wire diagram. Duplicate ids are resolved
/// last-write-wins, with a diagnostic; the serializer prunes whatever is
/// structurally inconsistent on the next export.
pub fn deserialize(diagram: &Diagram) -> GraphStore {
    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for node in &diagram.nodes {
        if nodes.insert(node.id.clone(), node.clone()).is_some() {
            warn!(node_id = %node.id, "duplicate node id in wire diagram, keeping the last one");
        }
    }

    let mut handles: BTreeMap<HandleKey, Handle> = BTreeMap::new();
    for handle in &diagram.handles {
        if handles.insert(handle.key(), handle.clone()).is_some() {
            warn!(
                handle_id = %handle.id,
                direction = %handle.direction,
                "duplicate handle in wire diagram, keeping the last one"
            );
        }
    }

    let mut arrows: BTreeMap<ArrowId, Arrow> = BTreeMap::new();
    for arrow in &diagram.arrows {
        if arrows.insert(arrow.id.clone(), arrow.clone()).is_some() {
            warn!(arrow_id = %arrow.id, "duplicate arrow id in wire diagram, keeping the last one");
        }
    }

    let mut persons: BTreeMap<PersonId, Person> = BTreeMap::new();
    for person in &diagram.persons {
        if persons.insert(person.id.clone(), person.clone()).is_some() {
            warn!(person_id = %person.id, "duplicate person id in wire diagram, keeping the last one");
        }
    }

    GraphStore::from_collections(nodes, handles, arrows, persons)
}

pub fn to_native_json(diagram: &Diagram) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(diagram)
}

pub fn from_native_json(json: &str) -> Result<Diagram, serde_json::Error> {
    serde_json::from_str(json)
}

fn export_node(node: &Node) -> Node {
    let mut node = node.clone();
    for (key, value) in default_node_data(node.node_type) {
        node.data.entry(key).or_insert(value);
    }
    node.data
        .entry("label".to_owned())
        .or_insert_with(|| node_type_config(node.node_type).label.into());
    node
}

fn export_arrow(arrow: &Arrow) -> Arrow {
    let mut arrow = arrow.clone();
    if let Some(data) = arrow.data.as_mut() {
        for key in ARROW_DATA_INTERNAL_KEYS {
            data.remove(key);
        }
        if data.is_empty() {
            arrow.data = None;
        }
    }
    arrow
}

fn export_person(person: &Person) -> Person {
    let mut person = person.clone();
    person.masked_api_key = None;
    person
}
