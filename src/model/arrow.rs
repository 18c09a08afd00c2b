// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{ArrowId, HandleId};
use super::node::JsonMap;

/// Semantic tag describing the payload an arrow carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Empty,
    Generic,
    RawText,
    ConversationState,
    Object,
    Variable,
    Binary,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Generic => "generic",
            Self::RawText => "raw_text",
            Self::ConversationState => "conversation_state",
            Self::Object => "object",
            Self::Variable => "variable",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed connection from one node's output handle to another node's
/// input handle. Node identity is recoverable by parsing either endpoint's
/// handle id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Arrow {
    pub id: ArrowId,
    pub source: HandleId,
    pub target: HandleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonMap>,
}

impl Arrow {
    pub fn new(id: ArrowId, source: HandleId, target: HandleId) -> Self {
        Self {
            id,
            source,
            target,
            content_type: None,
            label: None,
            data: None,
        }
    }

    /// The `branch` data attribute set on condition branch arrows.
    pub fn branch(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("branch"))
            .and_then(serde_json::Value::as_str)
    }

    pub fn set_branch(&mut self, branch: &str) {
        self.data
            .get_or_insert_with(JsonMap::new)
            .insert("branch".to_owned(), serde_json::Value::from(branch));
    }
}
