// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Shared deterministic test fixtures (no RNG, no generated ids).

use crate::graph::store::{ArrowPatch, GraphStore};
use crate::model::arrow::ContentType;
use crate::model::handle::HandleLabel;
use crate::model::ids::{ApiKeyId, ArrowId, HandleId, NodeId, PersonId};
use crate::model::node::{JsonMap, Vec2};
use crate::model::person::{LlmConfig, LlmService};
use crate::registry::NodeType;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn aid(value: &str) -> ArrowId {
    ArrowId::new(value).expect("arrow id")
}

fn handle(node_id: &NodeId, label: HandleLabel) -> HandleId {
    HandleId::compose(node_id, label)
}

pub(crate) fn llm_config() -> LlmConfig {
    LlmConfig {
        service: LlmService::Anthropic,
        model: "claude".to_owned(),
        api_key_id: ApiKeyId::new("apikey_1").expect("api key id"),
        system_prompt: None,
        temperature: None,
        voice: None,
    }
}

/// `start` feeding a `person_job` on its `first` input, with the job bound to
/// a person.
pub(crate) fn start_person_flow() -> GraphStore {
    let mut store = GraphStore::new();

    let person_id = PersonId::new("ada").expect("person id");
    store
        .add_person_with_id(person_id.clone(), "Ada", llm_config())
        .expect("add person");

    let start = nid("start");
    store
        .add_node_with_id(start.clone(), NodeType::Start, Vec2::new(0, 0), JsonMap::new())
        .expect("add start");

    let job = nid("ask");
    let mut overrides = JsonMap::new();
    overrides.insert(
        "person".to_owned(),
        serde_json::Value::String(person_id.as_str().to_owned()),
    );
    store
        .add_node_with_id(job.clone(), NodeType::PersonJob, Vec2::new(200, 0), overrides)
        .expect("add person_job");

    store
        .add_arrow_with_id(
            aid("a1"),
            handle(&start, HandleLabel::Default),
            handle(&job, HandleLabel::First),
            None,
            None,
        )
        .expect("connect");

    store
}

/// `db` feeding a `condition` tagged `conversation_state`, with both branches
/// wired to endpoints. The true branch inherits the inbound content type.
pub(crate) fn condition_branch_flow() -> GraphStore {
    let mut store = GraphStore::new();

    let db = nid("load");
    let cond = nid("check");
    let done = nid("done");
    let retry = nid("retry");

    store
        .add_node_with_id(db.clone(), NodeType::Db, Vec2::new(0, 0), JsonMap::new())
        .expect("add db");
    store
        .add_node_with_id(cond.clone(), NodeType::Condition, Vec2::new(200, 0), JsonMap::new())
        .expect("add condition");
    store
        .add_node_with_id(done.clone(), NodeType::Endpoint, Vec2::new(400, -80), JsonMap::new())
        .expect("add endpoint");
    store
        .add_node_with_id(retry.clone(), NodeType::Endpoint, Vec2::new(400, 80), JsonMap::new())
        .expect("add endpoint");

    let inbound = aid("a1");
    store
        .add_arrow_with_id(
            inbound.clone(),
            handle(&db, HandleLabel::Default),
            handle(&cond, HandleLabel::Default),
            None,
            None,
        )
        .expect("connect inbound");
    store
        .update_arrow(
            &inbound,
            &ArrowPatch {
                content_type: Some(ContentType::ConversationState),
                ..ArrowPatch::default()
            },
        )
        .expect("retag inbound");

    store
        .add_arrow_with_id(
            aid("a2"),
            handle(&cond, HandleLabel::CondTrue),
            handle(&done, HandleLabel::Default),
            None,
            None,
        )
        .expect("connect true branch");
    store
        .add_arrow_with_id(
            aid("a3"),
            handle(&cond, HandleLabel::CondFalse),
            handle(&retry, HandleLabel::Default),
            None,
            None,
        )
        .expect("connect false branch");

    store
}
