// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::NodeId;
use crate::registry::NodeType;

/// Type-specific node data as edited by the property panel.
pub type JsonMap = BTreeMap<String, serde_json::Value>;

/// Canvas position in editor coordinates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A typed unit of work in the diagram graph.
///
/// The shape of `data` is declared by the node-type registry; the store merges
/// registry defaults with caller overrides on creation and the property form
/// patches individual keys afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Vec2,
    pub data: JsonMap,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, position: Vec2, data: JsonMap) -> Self {
        Self {
            id,
            node_type,
            position,
            data,
        }
    }

    /// The `person` soft reference carried by person-job style nodes, if any.
    pub fn person_ref(&self) -> Option<&str> {
        self.data.get("person").and_then(serde_json::Value::as_str)
    }
}
