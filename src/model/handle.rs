// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{HandleId, NodeId};

/// The set of handle labels node types may declare.
///
/// `CondTrue`/`CondFalse` are the condition branch labels and serialize as
/// `"true"`/`"false"`; every other label serializes as its lowercase name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HandleLabel {
    Default,
    First,
    #[serde(rename = "true")]
    CondTrue,
    #[serde(rename = "false")]
    CondFalse,
    Success,
    Error,
    Results,
}

impl HandleLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::First => "first",
            Self::CondTrue => "true",
            Self::CondFalse => "false",
            Self::Success => "success",
            Self::Error => "error",
            Self::Results => "results",
        }
    }

    /// Whether this label marks a condition branch output.
    pub fn is_condition_branch(self) -> bool {
        matches!(self, Self::CondTrue | Self::CondFalse)
    }
}

impl fmt::Display for HandleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHandleLabel {
    pub label: String,
}

impl fmt::Display for UnknownHandleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown handle label '{}'", self.label)
    }
}

impl std::error::Error for UnknownHandleLabel {}

impl FromStr for HandleLabel {
    type Err = UnknownHandleLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "first" => Ok(Self::First),
            "true" => Ok(Self::CondTrue),
            "false" => Ok(Self::CondFalse),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "results" => Ok(Self::Results),
            other => Err(UnknownHandleLabel {
                label: other.to_owned(),
            }),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HandleDirection {
    Input,
    Output,
}

impl HandleDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for HandleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Any,
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// Where a handle attaches on the rendered node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Left,
    Right,
    Top,
    Bottom,
}

/// A named, directional connection point owned by exactly one node.
///
/// Handles are derived from the node-type registry, never authored directly;
/// a handle whose `node_id` no longer names a live node is pruned at
/// serialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Handle {
    pub id: HandleId,
    pub node_id: NodeId,
    pub label: HandleLabel,
    pub direction: HandleDirection,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<HandlePosition>,
}

impl Handle {
    /// Keying pair for handle collections. The id grammar omits direction, so
    /// a label declared on both sides of a node yields two handles that share
    /// one id and differ only here.
    pub fn key(&self) -> (HandleId, HandleDirection) {
        (self.id.clone(), self.direction)
    }
}
