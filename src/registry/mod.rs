// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Static node-type registry.
//!
//! Node types are an exhaustive enum, so every lookup site matches at compile
//! time and the per-type tables below are the single source for display
//! config, declared handle labels, default data, and property-form fields.
//! The only place an unknown type can surface is [`NodeType::from_str`] at
//! the wire boundary.

pub mod fields;

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::handle::HandleLabel;
use crate::model::node::JsonMap;
pub use fields::{validate_node_data, FieldDefinition, FieldIssue, FieldKind, IssueKind};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Start,
    PersonJob,
    PersonBatchJob,
    Condition,
    CodeJob,
    ApiJob,
    Endpoint,
    Db,
    UserResponse,
    Hook,
    TemplateJob,
    SubDiagram,
}

impl NodeType {
    pub const ALL: [NodeType; 12] = [
        NodeType::Start,
        NodeType::PersonJob,
        NodeType::PersonBatchJob,
        NodeType::Condition,
        NodeType::CodeJob,
        NodeType::ApiJob,
        NodeType::Endpoint,
        NodeType::Db,
        NodeType::UserResponse,
        NodeType::Hook,
        NodeType::TemplateJob,
        NodeType::SubDiagram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PersonJob => "person_job",
            Self::PersonBatchJob => "person_batch_job",
            Self::Condition => "condition",
            Self::CodeJob => "code_job",
            Self::ApiJob => "api_job",
            Self::Endpoint => "endpoint",
            Self::Db => "db",
            Self::UserResponse => "user_response",
            Self::Hook => "hook",
            Self::TemplateJob => "template_job",
            Self::SubDiagram => "sub_diagram",
        }
    }

    pub fn config(self) -> &'static NodeTypeConfig {
        node_type_config(self)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown node-type tag at the wire boundary. This is a caller error, never
/// silently defaulted: it means the editor and the data disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeType {
    pub tag: String,
}

impl fmt::Display for UnknownNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node type '{}'", self.tag)
    }
}

impl std::error::Error for UnknownNodeType {}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|node_type| node_type.as_str() == s)
            .ok_or_else(|| UnknownNodeType { tag: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Control,
    Ai,
    Compute,
    Data,
    Integration,
    Interaction,
}

/// Visual and structural configuration for one node type.
// Field definitions carry f64 bounds, so Eq is not derivable here.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTypeConfig {
    pub node_type: NodeType,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: NodeCategory,
    pub inputs: &'static [HandleLabel],
    pub outputs: &'static [HandleLabel],
    pub fields: &'static [FieldDefinition],
}

const DEFAULT_IN: &[HandleLabel] = &[HandleLabel::Default];
const DEFAULT_OUT: &[HandleLabel] = &[HandleLabel::Default];

pub fn node_type_config(node_type: NodeType) -> &'static NodeTypeConfig {
    match node_type {
        NodeType::Start => &NodeTypeConfig {
            node_type: NodeType::Start,
            label: "Start",
            icon: "🚀",
            color: "#22c55e",
            category: NodeCategory::Control,
            inputs: &[],
            outputs: DEFAULT_OUT,
            fields: fields::START_FIELDS,
        },
        NodeType::PersonJob => &NodeTypeConfig {
            node_type: NodeType::PersonJob,
            label: "Person Job",
            icon: "🤖",
            color: "#2563eb",
            category: NodeCategory::Ai,
            inputs: &[HandleLabel::Default, HandleLabel::First],
            outputs: DEFAULT_OUT,
            fields: fields::PERSON_JOB_FIELDS,
        },
        NodeType::PersonBatchJob => &NodeTypeConfig {
            node_type: NodeType::PersonBatchJob,
            label: "Person Batch Job",
            icon: "📦",
            color: "#7c3aed",
            category: NodeCategory::Ai,
            inputs: &[HandleLabel::Default, HandleLabel::First],
            outputs: DEFAULT_OUT,
            fields: fields::PERSON_BATCH_JOB_FIELDS,
        },
        NodeType::Condition => &NodeTypeConfig {
            node_type: NodeType::Condition,
            label: "Condition",
            icon: "🔀",
            color: "#f59e0b",
            category: NodeCategory::Control,
            inputs: DEFAULT_IN,
            outputs: &[HandleLabel::CondTrue, HandleLabel::CondFalse],
            fields: fields::CONDITION_FIELDS,
        },
        NodeType::CodeJob => &NodeTypeConfig {
            node_type: NodeType::CodeJob,
            label: "Code Job",
            icon: "💻",
            color: "#0ea5e9",
            category: NodeCategory::Compute,
            inputs: DEFAULT_IN,
            outputs: DEFAULT_OUT,
            fields: fields::CODE_JOB_FIELDS,
        },
        NodeType::ApiJob => &NodeTypeConfig {
            node_type: NodeType::ApiJob,
            label: "API Job",
            icon: "🌐",
            color: "#14b8a6",
            category: NodeCategory::Integration,
            inputs: DEFAULT_IN,
            outputs: DEFAULT_OUT,
            fields: fields::API_JOB_FIELDS,
        },
        NodeType::Endpoint => &NodeTypeConfig {
            node_type: NodeType::Endpoint,
            label: "Endpoint",
            icon: "🏁",
            color: "#ef4444",
            category: NodeCategory::Control,
            inputs: DEFAULT_IN,
            outputs: &[],
            fields: fields::ENDPOINT_FIELDS,
        },
        NodeType::Db => &NodeTypeConfig {
            node_type: NodeType::Db,
            label: "DB",
            icon: "🗄️",
            color: "#a16207",
            category: NodeCategory::Data,
            inputs: DEFAULT_IN,
            outputs: DEFAULT_OUT,
            fields: fields::DB_FIELDS,
        },
        NodeType::UserResponse => &NodeTypeConfig {
            node_type: NodeType::UserResponse,
            label: "User Response",
            icon: "💬",
            color: "#db2777",
            category: NodeCategory::Interaction,
            inputs: DEFAULT_IN,
            outputs: DEFAULT_OUT,
            fields: fields::USER_RESPONSE_FIELDS,
        },
        NodeType::Hook => &NodeTypeConfig {
            node_type: NodeType::Hook,
            label: "Hook",
            icon: "🪝",
            color: "#64748b",
            category: NodeCategory::Integration,
            inputs: DEFAULT_IN,
            outputs: &[HandleLabel::Success, HandleLabel::Error],
            fields: fields::HOOK_FIELDS,
        },
        NodeType::TemplateJob => &NodeTypeConfig {
            node_type: NodeType::TemplateJob,
            label: "Template Job",
            icon: "📐",
            color: "#84cc16",
            category: NodeCategory::Compute,
            inputs: DEFAULT_IN,
            outputs: DEFAULT_OUT,
            fields: fields::TEMPLATE_JOB_FIELDS,
        },
        NodeType::SubDiagram => &NodeTypeConfig {
            node_type: NodeType::SubDiagram,
            label: "Sub Diagram",
            icon: "🧩",
            color: "#6366f1",
            category: NodeCategory::Control,
            inputs: DEFAULT_IN,
            outputs: &[HandleLabel::Default, HandleLabel::Results],
            fields: fields::SUB_DIAGRAM_FIELDS,
        },
    }
}

/// Default `data` for a freshly created node of the given type. Also the
/// single backfill source used at serialization time.
pub fn default_node_data(node_type: NodeType) -> JsonMap {
    use serde_json::json;

    let mut data = JsonMap::new();
    match node_type {
        NodeType::Start => {
            data.insert("trigger_mode".to_owned(), json!("manual"));
            data.insert("custom_data".to_owned(), json!({}));
        }
        NodeType::PersonJob => {
            data.insert("default_prompt".to_owned(), json!(""));
            data.insert("max_iteration".to_owned(), json!(1));
        }
        NodeType::PersonBatchJob => {
            data.insert("default_prompt".to_owned(), json!(""));
            data.insert("max_iteration".to_owned(), json!(1));
            data.insert("batch_key".to_owned(), json!("items"));
        }
        NodeType::Condition => {
            data.insert("condition_type".to_owned(), json!("expression"));
            data.insert("expression".to_owned(), json!(""));
        }
        NodeType::CodeJob => {
            data.insert("language".to_owned(), json!("python"));
            data.insert("code".to_owned(), json!(""));
        }
        NodeType::ApiJob => {
            data.insert("url".to_owned(), json!(""));
            data.insert("method".to_owned(), json!("GET"));
        }
        NodeType::Endpoint => {
            data.insert("save_to_file".to_owned(), json!(false));
        }
        NodeType::Db => {
            data.insert("sub_type".to_owned(), json!("fixed_prompt"));
            data.insert("operation".to_owned(), json!("read"));
        }
        NodeType::UserResponse => {
            data.insert("prompt".to_owned(), json!(""));
            data.insert("timeout".to_owned(), json!(60));
        }
        NodeType::Hook => {
            data.insert("hook_type".to_owned(), json!("shell"));
            data.insert("command".to_owned(), json!(""));
        }
        NodeType::TemplateJob => {
            data.insert("template_path".to_owned(), json!(""));
            data.insert("output_path".to_owned(), json!(""));
        }
        NodeType::SubDiagram => {
            data.insert("diagram_name".to_owned(), json!(""));
        }
    }
    data
}
