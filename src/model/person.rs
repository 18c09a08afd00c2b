// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{ApiKeyId, PersonId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LlmService {
    Openai,
    Anthropic,
    Google,
    Ollama,
}

/// LLM settings for a configured agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LlmConfig {
    pub service: LlmService,
    pub model: String,
    pub api_key_id: ApiKeyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// A configured LLM agent referenced by person-job style nodes.
///
/// The reference from node data is soft: deleting a person clears the
/// reference from any node that carried it but never deletes the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    pub id: PersonId,
    pub label: String,
    pub llm_config: LlmConfig,
    /// UI-only preview of the API key; stripped before export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_api_key: Option<String>,
}

impl Person {
    pub fn new(id: PersonId, label: impl Into<String>, llm_config: LlmConfig) -> Self {
        Self {
            id,
            label: label.into(),
            llm_config,
            masked_api_key: None,
        }
    }
}
