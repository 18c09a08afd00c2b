// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Content-type inference and arrow migration.
//!
//! An arrow's semantic content type is derived from its source node's type
//! and handle, and re-derived whenever the arrows feeding a condition node
//! change. Re-running the rules over an already-correct arrow set is a no-op.

use std::collections::BTreeMap;

use crate::model::arrow::{Arrow, ContentType};
use crate::model::handle::HandleLabel;
use crate::model::ids::{ArrowId, HandleId, NodeId};
use crate::model::node::Node;
use crate::registry::NodeType;

/// The outcome of inferring a single arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inference {
    pub content_type: ContentType,
    /// Set when the arrow leaves a condition branch handle; normalized to the
    /// lowercase `true`/`false` label.
    pub branch: Option<HandleLabel>,
}

/// Infers the content type for an arrow leaving `source`.
///
/// Rules, in order: arrows leaving a `start` node carry `empty`; arrows
/// leaving a condition branch handle inherit the condition's primary inbound
/// content type (else `generic`); everything else keeps its existing content
/// type, defaulting to `raw_text`.
pub fn infer_content_type(
    nodes: &BTreeMap<NodeId, Node>,
    arrows: &BTreeMap<ArrowId, Arrow>,
    source: &HandleId,
    existing: Option<ContentType>,
) -> Inference {
    let fallback = Inference {
        content_type: existing.unwrap_or(ContentType::RawText),
        branch: None,
    };

    let Ok((source_node_id, source_label)) = source.parse() else {
        return fallback;
    };
    let Some(source_node) = nodes.get(&source_node_id) else {
        return fallback;
    };

    if source_node.node_type == NodeType::Start {
        return Inference {
            content_type: ContentType::Empty,
            branch: None,
        };
    }

    if source_label.is_condition_branch() {
        let inherited =
            primary_inbound_content(arrows, &source_node_id).unwrap_or(ContentType::Generic);
        return Inference {
            content_type: inherited,
            branch: Some(source_label),
        };
    }

    fallback
}

/// The content type of the condition node's primary inbound arrow: the
/// inbound arrow with the lowest id, which is stable across serialization.
pub fn primary_inbound_content(
    arrows: &BTreeMap<ArrowId, Arrow>,
    node_id: &NodeId,
) -> Option<ContentType> {
    arrows
        .values()
        .find(|arrow| targets_node(arrow, node_id))
        .and_then(|arrow| arrow.content_type)
}

fn targets_node(arrow: &Arrow, node_id: &NodeId) -> bool {
    arrow
        .target
        .parse()
        .is_ok_and(|(target_node, _)| &target_node == node_id)
}

fn sources_branch_of(arrow: &Arrow, node_id: &NodeId) -> Option<HandleLabel> {
    let (source_node, label) = arrow.source.parse().ok()?;
    (&source_node == node_id && label.is_condition_branch()).then_some(label)
}

/// Re-derives the branch arrows leaving `condition_id`, returning the ids of
/// arrows that actually changed. No-op unless the node is a live condition.
pub(crate) fn reinfer_branch_arrows(
    nodes: &BTreeMap<NodeId, Node>,
    arrows: &mut BTreeMap<ArrowId, Arrow>,
    condition_id: &NodeId,
) -> Vec<ArrowId> {
    let is_condition = nodes
        .get(condition_id)
        .is_some_and(|node| node.node_type == NodeType::Condition);
    if !is_condition {
        return Vec::new();
    }

    let inherited =
        primary_inbound_content(arrows, condition_id).unwrap_or(ContentType::Generic);

    let planned: Vec<(ArrowId, HandleLabel)> = arrows
        .values()
        .filter_map(|arrow| {
            sources_branch_of(arrow, condition_id).map(|label| (arrow.id.clone(), label))
        })
        .collect();

    let mut changed = Vec::new();
    for (arrow_id, label) in planned {
        let arrow = arrows
            .get_mut(&arrow_id)
            .expect("planned arrow still present");
        let content_stale = arrow.content_type != Some(inherited);
        let branch_stale = arrow.branch() != Some(label.as_str());
        if content_stale || branch_stale {
            arrow.content_type = Some(inherited);
            arrow.set_branch(label.as_str());
            changed.push(arrow_id);
        }
    }
    changed
}
