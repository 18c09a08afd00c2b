// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use dipeo_core::graph::store::GraphStore;
use dipeo_core::model::{ArrowId, HandleId, HandleLabel, JsonMap, NodeId, Vec2};
use dipeo_core::registry::NodeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    fn node_count(self) -> usize {
        match self {
            Case::Small => 8,
            Case::Medium => 64,
            Case::Large => 512,
        }
    }
}

/// A linear flow: one `start` node followed by a chain of `person_job` nodes,
/// every adjacent pair connected `default -> default`.
pub fn chain(case: Case) -> GraphStore {
    let count = case.node_count();
    let mut store = GraphStore::new();

    let mut node_ids = Vec::with_capacity(count);
    for idx in 0..count {
        let node_id = NodeId::new(format!("n{idx:04}")).expect("node id");
        let node_type = if idx == 0 {
            NodeType::Start
        } else {
            NodeType::PersonJob
        };
        store
            .add_node_with_id(
                node_id.clone(),
                node_type,
                Vec2::new((idx as i32) * 200, 0),
                JsonMap::new(),
            )
            .expect("add node");
        node_ids.push(node_id);
    }

    for idx in 0..count - 1 {
        store
            .add_arrow_with_id(
                ArrowId::new(format!("a{idx:04}")).expect("arrow id"),
                HandleId::compose(&node_ids[idx], HandleLabel::Default),
                HandleId::compose(&node_ids[idx + 1], HandleLabel::Default),
                None,
                None,
            )
            .expect("add arrow");
    }

    store
}

pub fn person_job_ids(store: &GraphStore) -> Vec<NodeId> {
    store
        .nodes()
        .values()
        .filter(|node| node.node_type == NodeType::PersonJob)
        .map(|node| node.id.clone())
        .collect()
}
