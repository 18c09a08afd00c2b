// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::handle::Handle;
use super::ids::DiagramId;
use super::node::Node;
use super::person::Person;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagramMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiagramId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// The array-based wire form of a diagram, as used by the native JSON file
/// format and the GraphQL API. The map-based editing form lives in
/// [`crate::graph::GraphStore`]; `crate::wire` converts between the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub handles: Vec<Handle>,
    #[serde(default)]
    pub arrows: Vec<Arrow>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DiagramMetadata>,
}

impl Diagram {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.handles.is_empty()
            && self.arrows.is_empty()
            && self.persons.is_empty()
    }
}
