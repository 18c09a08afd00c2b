// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Mutation operations for the graph store.
//!
//! Operations are applied with optimistic concurrency (revision checks) and
//! produce a minimal delta that the UI can use to refresh derived state. A
//! stale `base_rev` — typically an async save/load response racing a newer
//! local edit — is rejected instead of being applied blindly.

use std::collections::HashSet;
use std::fmt;

use crate::graph::store::{ArrowPatch, GraphStore, PersonPatch, StoreError};
use crate::model::ids::{ArrowId, HandleId, NodeId, PersonId};
use crate::model::node::{JsonMap, Vec2};
use crate::model::person::LlmConfig;
use crate::registry::NodeType;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Node(NodeOp),
    Arrow(ArrowOp),
    Person(PersonOp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeOp {
    Add {
        node_id: NodeId,
        node_type: NodeType,
        position: Vec2,
        overrides: JsonMap,
    },
    Update {
        node_id: NodeId,
        patch: JsonMap,
    },
    Remove {
        node_id: NodeId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowOp {
    Add {
        arrow_id: ArrowId,
        source: HandleId,
        target: HandleId,
        label: Option<String>,
        data: Option<JsonMap>,
    },
    Update {
        arrow_id: ArrowId,
        patch: ArrowPatch,
    },
    Remove {
        arrow_id: ArrowId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonOp {
    Add {
        person_id: PersonId,
        label: String,
        llm_config: LlmConfig,
    },
    Update {
        person_id: PersonId,
        patch: PersonPatch,
    },
    Remove {
        person_id: PersonId,
    },
}

/// Reference to one entity touched by a batch of ops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Node(NodeId),
    Handle(HandleId),
    Arrow(ArrowId),
    Person(PersonId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which entities changed as the result of applying
/// ops. Intentionally coarse: added/removed/updated refs only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity_ref: EntityRef) {
        self.removed.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.added.insert(entity_ref);
    }

    fn record_removed(&mut self, entity_ref: EntityRef) {
        self.added.remove(&entity_ref);
        self.updated.remove(&entity_ref);
        self.removed.insert(entity_ref);
    }

    fn record_updated(&mut self, entity_ref: EntityRef) {
        if self.added.contains(&entity_ref) || self.removed.contains(&entity_ref) {
            return;
        }
        self.updated.insert(entity_ref);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
        }
    }
}

/// Applies a batch of ops against `base_rev`.
///
/// The batch is atomic: ops run against a scratch copy that only replaces the
/// store when every op succeeds, so a structural error mid-batch leaves the
/// caller's store untouched.
pub fn apply_ops(
    store: &mut GraphStore,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = store.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut scratch = store.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        match op {
            Op::Node(node_op) => apply_node_op(&mut scratch, node_op, &mut delta)?,
            Op::Arrow(arrow_op) => apply_arrow_op(&mut scratch, arrow_op, &mut delta)?,
            Op::Person(person_op) => apply_person_op(&mut scratch, person_op, &mut delta)?,
        }
    }

    let delta = delta.finish();

    // One revision step per effective batch, regardless of how many member
    // mutations it took. A batch whose delta is empty changed nothing.
    let new_rev = if delta.is_empty() {
        current_rev
    } else {
        current_rev.saturating_add(1)
    };
    scratch.set_rev(new_rev);

    *store = scratch;
    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    Store(StoreError),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                base_rev,
                current_rev,
            } => {
                write!(
                    f,
                    "stale base_rev (base_rev={base_rev}, current_rev={current_rev})"
                )
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Conflict { .. } => None,
        }
    }
}

impl From<StoreError> for ApplyError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

// Extracted op-application implementation for node/arrow/person mutations.
include!("ops_impl.rs");
