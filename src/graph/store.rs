// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! The owned, map-based graph store.
//!
//! All mutations are synchronous and run to completion; structural errors
//! leave the store untouched. The store keeps a monotonic revision counter
//! that advances once per effective mutation — an update that changes
//! nothing does not bump it, which is what downstream consumers use to skip
//! redundant refreshes.

use std::collections::BTreeMap;
use std::fmt;

use crate::graph::handles::derive_handles;
use crate::graph::infer::{infer_content_type, reinfer_branch_arrows};
use crate::model::arrow::{Arrow, ContentType};
use crate::model::handle::{Handle, HandleDirection};
use crate::model::ids::{ArrowId, HandleId, NodeId, PersonId};
use crate::model::node::{JsonMap, Node, Vec2};
use crate::model::person::{LlmConfig, Person};
use crate::registry::{default_node_data, NodeType};

/// Key of the handle collection. Handle ids carry `{nodeId}:{label}` only;
/// direction disambiguates labels declared on both sides of a node.
pub type HandleKey = (HandleId, HandleDirection);

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NodeNotFound { node_id: NodeId },
    ArrowNotFound { arrow_id: ArrowId },
    PersonNotFound { person_id: PersonId },
    DuplicateNode { node_id: NodeId },
    DuplicateArrow { arrow_id: ArrowId },
    DuplicatePerson { person_id: PersonId },
    UnknownHandle { handle_id: HandleId, direction: HandleDirection },
    HandleWithoutNode { handle_id: HandleId, node_id: NodeId },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::ArrowNotFound { arrow_id } => write!(f, "arrow not found (id={arrow_id})"),
            Self::PersonNotFound { person_id } => {
                write!(f, "person not found (id={person_id})")
            }
            Self::DuplicateNode { node_id } => {
                write!(f, "node already exists (id={node_id})")
            }
            Self::DuplicateArrow { arrow_id } => {
                write!(f, "arrow already exists (id={arrow_id})")
            }
            Self::DuplicatePerson { person_id } => {
                write!(f, "person already exists (id={person_id})")
            }
            Self::UnknownHandle { handle_id, direction } => {
                write!(f, "invalid handle reference (id={handle_id}, direction={direction})")
            }
            Self::HandleWithoutNode { handle_id, node_id } => write!(
                f,
                "handle {handle_id} references missing node {node_id}"
            ),
        }
    }
}

impl std::error::Error for StoreError {}

/// Stable array projections of the four collections, for consumers that need
/// array identity (list renderers). Rebuilt in one pass when stale, so batch
/// mutations pay for a single refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub nodes: Vec<Node>,
    pub handles: Vec<Handle>,
    pub arrows: Vec<Arrow>,
    pub persons: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRemoval {
    pub node: Node,
    pub handles: Vec<HandleKey>,
    pub arrows: Vec<ArrowId>,
    /// Branch arrows of other condition nodes re-inferred by the cascade.
    pub reinferred: Vec<ArrowId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowInsertion {
    pub arrow_id: ArrowId,
    pub reinferred: Vec<ArrowId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowPatch {
    pub label: Option<String>,
    pub content_type: Option<ContentType>,
    pub data: Option<JsonMap>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowUpdate {
    pub changed: bool,
    pub reinferred: Vec<ArrowId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowRemoval {
    pub arrow: Arrow,
    pub reinferred: Vec<ArrowId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
    pub label: Option<String>,
    pub llm_config: Option<LlmConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonRemoval {
    pub person: Person,
    /// Nodes whose soft `person` reference was cleared by the cascade.
    pub cleared_nodes: Vec<NodeId>,
}

/// In-memory diagram being edited: nodes, arrows, handles, and persons keyed
/// by branded id, with cross-collection consistency maintained on every
/// mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, Node>,
    handles: BTreeMap<HandleKey, Handle>,
    arrows: BTreeMap<ArrowId, Arrow>,
    persons: BTreeMap<PersonId, Person>,
    rev: u64,
    projection: Projection,
    projection_dirty: bool,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a store from already-keyed collections (deserialization
    /// path). No validation happens here; the serializer prunes on the way
    /// out instead.
    pub fn from_collections(
        nodes: BTreeMap<NodeId, Node>,
        handles: BTreeMap<HandleKey, Handle>,
        arrows: BTreeMap<ArrowId, Arrow>,
        persons: BTreeMap<PersonId, Person>,
    ) -> Self {
        Self {
            nodes,
            handles,
            arrows,
            persons,
            rev: 0,
            projection: Projection::default(),
            projection_dirty: true,
        }
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn handles(&self) -> &BTreeMap<HandleKey, Handle> {
        &self.handles
    }

    pub fn arrows(&self) -> &BTreeMap<ArrowId, Arrow> {
        &self.arrows
    }

    pub fn persons(&self) -> &BTreeMap<PersonId, Person> {
        &self.persons
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn arrow(&self, arrow_id: &ArrowId) -> Option<&Arrow> {
        self.arrows.get(arrow_id)
    }

    pub fn person(&self, person_id: &PersonId) -> Option<&Person> {
        self.persons.get(person_id)
    }

    /// Monotonic change-version counter; constant across no-op mutations.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn projection(&mut self) -> &Projection {
        if self.projection_dirty {
            self.projection = Projection {
                nodes: self.nodes.values().cloned().collect(),
                handles: self.handles.values().cloned().collect(),
                arrows: self.arrows.values().cloned().collect(),
                persons: self.persons.values().cloned().collect(),
            };
            self.projection_dirty = false;
        }
        &self.projection
    }

    fn bump(&mut self) {
        self.rev = self.rev.saturating_add(1);
        self.projection_dirty = true;
    }

    /// Overrides the revision counter. Used by batch op application, which
    /// advances the counter once per effective batch rather than once per
    /// member mutation.
    pub(crate) fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    // ---- nodes ----

    /// Creates a node with registry defaults merged under `overrides` and
    /// eagerly materializes its derived handles.
    pub fn add_node(&mut self, node_type: NodeType, position: Vec2, overrides: JsonMap) -> NodeId {
        let node_id = NodeId::generate();
        self.add_node_with_id(node_id.clone(), node_type, position, overrides)
            .expect("generated node id is fresh");
        node_id
    }

    pub fn add_node_with_id(
        &mut self,
        node_id: NodeId,
        node_type: NodeType,
        position: Vec2,
        overrides: JsonMap,
    ) -> Result<(), StoreError> {
        if self.nodes.contains_key(&node_id) {
            return Err(StoreError::DuplicateNode { node_id });
        }

        let mut data = default_node_data(node_type);
        data.extend(overrides);
        self.nodes
            .insert(node_id.clone(), Node::new(node_id.clone(), node_type, position, data));

        for handle in derive_handles(&node_id, node_type) {
            self.handles.entry(handle.key()).or_insert(handle);
        }

        self.bump();
        Ok(())
    }

    /// Merges `patch` into the node's data. Keys whose value already matches
    /// are skipped; if nothing differs, the revision counter stays put.
    pub fn update_node(&mut self, node_id: &NodeId, patch: &JsonMap) -> Result<bool, StoreError> {
        let changed = self.merge_node_data(node_id, patch)?;
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Removes the node, its handles, and every arrow touching them, as one
    /// logical operation.
    pub fn delete_node(&mut self, node_id: &NodeId) -> Result<NodeRemoval, StoreError> {
        let removal = self.remove_node_cascade(node_id)?;
        self.bump();
        Ok(removal)
    }

    /// Same merges as [`Self::update_node`] per member, but all ids are
    /// checked up front and the revision/projection refresh is coalesced.
    pub fn batch_update_nodes(
        &mut self,
        patches: &[(NodeId, JsonMap)],
    ) -> Result<Vec<NodeId>, StoreError> {
        for (node_id, _) in patches {
            if !self.nodes.contains_key(node_id) {
                return Err(StoreError::NodeNotFound {
                    node_id: node_id.clone(),
                });
            }
        }

        let mut changed = Vec::new();
        for (node_id, patch) in patches {
            if self.merge_node_data(node_id, patch)? {
                changed.push(node_id.clone());
            }
        }
        if !changed.is_empty() {
            self.bump();
        }
        Ok(changed)
    }

    pub fn batch_delete_nodes(
        &mut self,
        node_ids: &[NodeId],
    ) -> Result<Vec<NodeRemoval>, StoreError> {
        for node_id in node_ids {
            if !self.nodes.contains_key(node_id) {
                return Err(StoreError::NodeNotFound {
                    node_id: node_id.clone(),
                });
            }
        }

        let mut removals = Vec::with_capacity(node_ids.len());
        for node_id in node_ids {
            // Earlier cascades in the batch may have already re-inferred
            // arrows; the per-node removal reports only what it removed.
            removals.push(self.remove_node_cascade(node_id)?);
        }
        if !removals.is_empty() {
            self.bump();
        }
        Ok(removals)
    }

    fn merge_node_data(&mut self, node_id: &NodeId, patch: &JsonMap) -> Result<bool, StoreError> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Err(StoreError::NodeNotFound {
                node_id: node_id.clone(),
            });
        };

        let mut changed = false;
        for (key, value) in patch {
            if node.data.get(key) != Some(value) {
                node.data.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        Ok(changed)
    }

    fn remove_node_cascade(&mut self, node_id: &NodeId) -> Result<NodeRemoval, StoreError> {
        let Some(node) = self.nodes.remove(node_id) else {
            return Err(StoreError::NodeNotFound {
                node_id: node_id.clone(),
            });
        };

        let removed_handles: Vec<HandleKey> = self
            .handles
            .iter()
            .filter(|(_, handle)| &handle.node_id == node_id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &removed_handles {
            self.handles.remove(key);
        }

        let removed_arrow_ids: Vec<ArrowId> = self
            .arrows
            .values()
            .filter(|arrow| {
                arrow_touches_node(arrow, node_id)
            })
            .map(|arrow| arrow.id.clone())
            .collect();

        let mut affected_conditions = Vec::new();
        for arrow_id in &removed_arrow_ids {
            let Some(arrow) = self.arrows.remove(arrow_id) else {
                continue;
            };
            if let Ok((target_node, _)) = arrow.target.parse() {
                if &target_node != node_id && !affected_conditions.contains(&target_node) {
                    affected_conditions.push(target_node);
                }
            }
        }

        let mut reinferred = Vec::new();
        for condition_id in affected_conditions {
            reinferred.extend(reinfer_branch_arrows(
                &self.nodes,
                &mut self.arrows,
                &condition_id,
            ));
        }

        Ok(NodeRemoval {
            node,
            handles: removed_handles,
            arrows: removed_arrow_ids,
            reinferred,
        })
    }

    // ---- arrows ----

    pub fn add_arrow(
        &mut self,
        source: HandleId,
        target: HandleId,
        label: Option<String>,
        data: Option<JsonMap>,
    ) -> Result<ArrowInsertion, StoreError> {
        let arrow_id = ArrowId::generate();
        let reinferred = self.add_arrow_with_id(arrow_id.clone(), source, target, label, data)?;
        Ok(ArrowInsertion {
            arrow_id,
            reinferred,
        })
    }

    /// Inserts an arrow after validating both endpoints, inferring its
    /// content type from the source node/handle. Returns the ids of any
    /// condition branch arrows re-inferred as a consequence.
    pub fn add_arrow_with_id(
        &mut self,
        arrow_id: ArrowId,
        source: HandleId,
        target: HandleId,
        label: Option<String>,
        data: Option<JsonMap>,
    ) -> Result<Vec<ArrowId>, StoreError> {
        if self.arrows.contains_key(&arrow_id) {
            return Err(StoreError::DuplicateArrow { arrow_id });
        }
        // Direction is implicit in the endpoint role: arrows leave output
        // handles and enter input handles.
        self.resolve_handle(&source, HandleDirection::Output)?;
        self.resolve_handle(&target, HandleDirection::Input)?;

        let inference = infer_content_type(&self.nodes, &self.arrows, &source, None);
        let mut arrow = Arrow::new(arrow_id.clone(), source, target.clone());
        arrow.content_type = Some(inference.content_type);
        arrow.label = label;
        arrow.data = data;
        if let Some(branch) = inference.branch {
            arrow.set_branch(branch.as_str());
        }
        self.arrows.insert(arrow_id, arrow);

        // A new inbound arrow can change what a condition's branches inherit.
        let mut reinferred = Vec::new();
        if let Ok((target_node, _)) = target.parse() {
            reinferred = reinfer_branch_arrows(&self.nodes, &mut self.arrows, &target_node);
        }

        self.bump();
        Ok(reinferred)
    }

    pub fn update_arrow(
        &mut self,
        arrow_id: &ArrowId,
        patch: &ArrowPatch,
    ) -> Result<ArrowUpdate, StoreError> {
        let Some(arrow) = self.arrows.get_mut(arrow_id) else {
            return Err(StoreError::ArrowNotFound {
                arrow_id: arrow_id.clone(),
            });
        };

        let mut changed = false;
        if let Some(label) = &patch.label {
            if arrow.label.as_deref() != Some(label) {
                arrow.label = Some(label.clone());
                changed = true;
            }
        }
        if let Some(content_type) = patch.content_type {
            if arrow.content_type != Some(content_type) {
                arrow.content_type = Some(content_type);
                changed = true;
            }
        }
        if let Some(data) = &patch.data {
            if arrow.data.as_ref() != Some(data) {
                arrow.data = Some(data.clone());
                changed = true;
            }
        }

        let target = arrow.target.clone();
        let mut reinferred = Vec::new();
        if changed {
            if let Ok((target_node, _)) = target.parse() {
                reinferred = reinfer_branch_arrows(&self.nodes, &mut self.arrows, &target_node);
            }
            self.bump();
        }
        Ok(ArrowUpdate {
            changed,
            reinferred,
        })
    }

    /// Removes the arrow; if it fed a condition node, that node's branch
    /// arrows are re-inferred against the remaining inbound set.
    pub fn delete_arrow(&mut self, arrow_id: &ArrowId) -> Result<ArrowRemoval, StoreError> {
        let Some(arrow) = self.arrows.remove(arrow_id) else {
            return Err(StoreError::ArrowNotFound {
                arrow_id: arrow_id.clone(),
            });
        };

        let mut reinferred = Vec::new();
        if let Ok((target_node, _)) = arrow.target.parse() {
            reinferred = reinfer_branch_arrows(&self.nodes, &mut self.arrows, &target_node);
        }

        self.bump();
        Ok(ArrowRemoval { arrow, reinferred })
    }

    fn resolve_handle(
        &self,
        handle_id: &HandleId,
        direction: HandleDirection,
    ) -> Result<&Handle, StoreError> {
        let Some(handle) = self.handles.get(&(handle_id.clone(), direction)) else {
            return Err(StoreError::UnknownHandle {
                handle_id: handle_id.clone(),
                direction,
            });
        };
        if !self.nodes.contains_key(&handle.node_id) {
            return Err(StoreError::HandleWithoutNode {
                handle_id: handle_id.clone(),
                node_id: handle.node_id.clone(),
            });
        }
        Ok(handle)
    }

    // ---- persons ----

    pub fn add_person(&mut self, label: impl Into<String>, llm_config: LlmConfig) -> PersonId {
        let person_id = PersonId::generate();
        self.add_person_with_id(person_id.clone(), label, llm_config)
            .expect("generated person id is fresh");
        person_id
    }

    pub fn add_person_with_id(
        &mut self,
        person_id: PersonId,
        label: impl Into<String>,
        llm_config: LlmConfig,
    ) -> Result<(), StoreError> {
        if self.persons.contains_key(&person_id) {
            return Err(StoreError::DuplicatePerson { person_id });
        }
        self.persons.insert(
            person_id.clone(),
            Person::new(person_id, label, llm_config),
        );
        self.bump();
        Ok(())
    }

    pub fn update_person(
        &mut self,
        person_id: &PersonId,
        patch: &PersonPatch,
    ) -> Result<bool, StoreError> {
        let Some(person) = self.persons.get_mut(person_id) else {
            return Err(StoreError::PersonNotFound {
                person_id: person_id.clone(),
            });
        };

        let mut changed = false;
        if let Some(label) = &patch.label {
            if &person.label != label {
                person.label = label.clone();
                changed = true;
            }
        }
        if let Some(llm_config) = &patch.llm_config {
            if &person.llm_config != llm_config {
                person.llm_config = llm_config.clone();
                changed = true;
            }
        }
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Removes the person and clears the soft `person` reference from every
    /// node that carried it, in the same logical mutation.
    pub fn delete_person(&mut self, person_id: &PersonId) -> Result<PersonRemoval, StoreError> {
        let Some(person) = self.persons.remove(person_id) else {
            return Err(StoreError::PersonNotFound {
                person_id: person_id.clone(),
            });
        };

        let mut cleared_nodes = Vec::new();
        for node in self.nodes.values_mut() {
            if node.person_ref() == Some(person_id.as_str()) {
                node.data.remove("person");
                cleared_nodes.push(node.id.clone());
            }
        }

        self.bump();
        Ok(PersonRemoval {
            person,
            cleared_nodes,
        })
    }
}

fn arrow_touches_node(arrow: &Arrow, node_id: &NodeId) -> bool {
    let source_hit = arrow
        .source
        .parse()
        .is_ok_and(|(owner, _)| &owner == node_id);
    let target_hit = arrow
        .target
        .parse()
        .is_ok_and(|(owner, _)| &owner == node_id);
    source_hit || target_hit
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ArrowPatch, GraphStore, PersonPatch, StoreError};
    use crate::model::arrow::ContentType;
    use crate::model::handle::{HandleDirection, HandleLabel};
    use crate::model::ids::{ApiKeyId, HandleId, NodeId};
    use crate::model::node::{JsonMap, Vec2};
    use crate::model::person::{LlmConfig, LlmService};
    use crate::registry::NodeType;

    fn llm_config() -> LlmConfig {
        LlmConfig {
            service: LlmService::Anthropic,
            model: "claude".to_owned(),
            api_key_id: ApiKeyId::new("apikey_1").expect("api key id"),
            system_prompt: None,
            temperature: None,
            voice: None,
        }
    }

    fn patch(key: &str, value: serde_json::Value) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(key.to_owned(), value);
        map
    }

    #[test]
    fn add_node_merges_defaults_and_materializes_handles() {
        let mut store = GraphStore::new();
        let node_id = store.add_node(
            NodeType::Db,
            Vec2::new(10, 20),
            patch("label", json!("My DB")),
        );

        let node = store.node(&node_id).expect("node");
        assert_eq!(node.data.get("sub_type"), Some(&json!("fixed_prompt")));
        assert_eq!(node.data.get("label"), Some(&json!("My DB")));

        let default = HandleId::compose(&node_id, HandleLabel::Default);
        assert!(store
            .handles()
            .contains_key(&(default.clone(), HandleDirection::Input)));
        assert!(store
            .handles()
            .contains_key(&(default, HandleDirection::Output)));
        assert_eq!(store.rev(), 1);
    }

    #[test]
    fn shared_label_materializes_both_directions() {
        // person_job declares `default` as both an input and an output, so
        // the two handles share one id and must coexist in the store.
        let mut store = GraphStore::new();
        let job = store.add_node(NodeType::PersonJob, Vec2::default(), JsonMap::new());

        let job_handles: Vec<_> = store
            .handles()
            .values()
            .filter(|handle| handle.node_id == job)
            .collect();
        assert_eq!(job_handles.len(), 3);

        let default = HandleId::compose(&job, HandleLabel::Default);
        let input = store
            .handles()
            .get(&(default.clone(), HandleDirection::Input))
            .expect("default input");
        let output = store
            .handles()
            .get(&(default.clone(), HandleDirection::Output))
            .expect("default output");
        assert_eq!(input.id, default);
        assert_eq!(output.id, default);
        assert_eq!(input.direction, HandleDirection::Input);
        assert_eq!(output.direction, HandleDirection::Output);
    }

    #[test]
    fn update_with_identical_values_does_not_bump_rev() {
        let mut store = GraphStore::new();
        let node_id = store.add_node(NodeType::Db, Vec2::default(), JsonMap::new());
        let rev_before = store.rev();

        let changed = store
            .update_node(&node_id, &patch("sub_type", json!("fixed_prompt")))
            .expect("update");
        assert!(!changed);
        assert_eq!(store.rev(), rev_before);

        let changed = store
            .update_node(&node_id, &patch("sub_type", json!("file")))
            .expect("update");
        assert!(changed);
        assert_eq!(store.rev(), rev_before + 1);
    }

    #[test]
    fn delete_node_cascades_to_handles_and_arrows() {
        let mut store = GraphStore::new();
        let start = store.add_node(NodeType::Start, Vec2::default(), JsonMap::new());
        let job = store.add_node(NodeType::PersonJob, Vec2::default(), JsonMap::new());
        store
            .add_arrow(
                HandleId::compose(&start, HandleLabel::Default),
                HandleId::compose(&job, HandleLabel::First),
                None,
                None,
            )
            .expect("connect");

        let removal = store.delete_node(&job).expect("delete");
        assert_eq!(removal.arrows.len(), 1);
        assert_eq!(removal.handles.len(), 3); // default + first inputs, default output

        assert!(store.arrows().is_empty());
        assert!(store
            .handles()
            .values()
            .all(|handle| handle.node_id != job));
        assert!(store.nodes().contains_key(&start));
    }

    #[test]
    fn add_arrow_rejects_unknown_handles() {
        let mut store = GraphStore::new();
        let start = store.add_node(NodeType::Start, Vec2::default(), JsonMap::new());
        let rev_before = store.rev();

        let bogus = HandleId::compose(
            &NodeId::new("ghost").expect("node id"),
            HandleLabel::Default,
        );
        let result = store.add_arrow(
            HandleId::compose(&start, HandleLabel::Default),
            bogus.clone(),
            None,
            None,
        );
        assert_eq!(
            result,
            Err(StoreError::UnknownHandle {
                handle_id: bogus,
                direction: HandleDirection::Input,
            })
        );
        // Structural error: no partial mutation.
        assert_eq!(store.rev(), rev_before);
        assert!(store.arrows().is_empty());
    }

    #[test]
    fn arrows_leaving_start_get_empty_content() {
        let mut store = GraphStore::new();
        let start = store.add_node(NodeType::Start, Vec2::default(), JsonMap::new());
        let job = store.add_node(NodeType::PersonJob, Vec2::default(), JsonMap::new());

        let insertion = store
            .add_arrow(
                HandleId::compose(&start, HandleLabel::Default),
                HandleId::compose(&job, HandleLabel::Default),
                None,
                None,
            )
            .expect("connect");

        let arrow = store.arrow(&insertion.arrow_id).expect("arrow");
        assert_eq!(arrow.content_type, Some(ContentType::Empty));
    }

    #[test]
    fn deleting_inbound_arrow_resets_condition_branches() {
        let mut store = GraphStore::new();
        let db = store.add_node(NodeType::Db, Vec2::default(), JsonMap::new());
        let cond = store.add_node(NodeType::Condition, Vec2::default(), JsonMap::new());
        let sink = store.add_node(NodeType::Endpoint, Vec2::default(), JsonMap::new());

        let inbound = store
            .add_arrow(
                HandleId::compose(&db, HandleLabel::Default),
                HandleId::compose(&cond, HandleLabel::Default),
                None,
                None,
            )
            .expect("connect");
        store
            .update_arrow(
                &inbound.arrow_id,
                &ArrowPatch {
                    content_type: Some(ContentType::ConversationState),
                    ..ArrowPatch::default()
                },
            )
            .expect("retag");

        let branch = store
            .add_arrow(
                HandleId::compose(&cond, HandleLabel::CondTrue),
                HandleId::compose(&sink, HandleLabel::Default),
                None,
                None,
            )
            .expect("connect branch");

        let arrow = store.arrow(&branch.arrow_id).expect("branch arrow");
        assert_eq!(arrow.content_type, Some(ContentType::ConversationState));
        assert_eq!(arrow.branch(), Some("true"));

        let removal = store.delete_arrow(&inbound.arrow_id).expect("delete");
        assert_eq!(removal.reinferred, vec![branch.arrow_id.clone()]);

        let arrow = store.arrow(&branch.arrow_id).expect("branch arrow");
        assert_eq!(arrow.content_type, Some(ContentType::Generic));
    }

    #[test]
    fn delete_person_clears_soft_references() {
        let mut store = GraphStore::new();
        let person_id = store.add_person("Ada", llm_config());
        let job = store.add_node(
            NodeType::PersonJob,
            Vec2::default(),
            patch("person", json!(person_id.as_str())),
        );
        let other = store.add_node(NodeType::PersonJob, Vec2::default(), JsonMap::new());

        let removal = store.delete_person(&person_id).expect("delete");
        assert_eq!(removal.cleared_nodes, vec![job.clone()]);

        assert_eq!(store.node(&job).expect("node").person_ref(), None);
        assert!(store.nodes().contains_key(&other));
        assert!(store.persons().is_empty());
    }

    #[test]
    fn update_person_detects_no_change() {
        let mut store = GraphStore::new();
        let person_id = store.add_person("Ada", llm_config());
        let rev_before = store.rev();

        let changed = store
            .update_person(
                &person_id,
                &PersonPatch {
                    label: Some("Ada".to_owned()),
                    llm_config: None,
                },
            )
            .expect("update");
        assert!(!changed);
        assert_eq!(store.rev(), rev_before);
    }

    #[test]
    fn batch_updates_bump_rev_once() {
        let mut store = GraphStore::new();
        let first = store.add_node(NodeType::Db, Vec2::default(), JsonMap::new());
        let second = store.add_node(NodeType::Db, Vec2::default(), JsonMap::new());
        let rev_before = store.rev();

        let changed = store
            .batch_update_nodes(&[
                (first.clone(), patch("operation", json!("write"))),
                (second.clone(), patch("operation", json!("append"))),
            ])
            .expect("batch");
        assert_eq!(changed, vec![first, second]);
        assert_eq!(store.rev(), rev_before + 1);
    }

    #[test]
    fn batch_delete_checks_all_ids_before_mutating() {
        let mut store = GraphStore::new();
        let live = store.add_node(NodeType::Db, Vec2::default(), JsonMap::new());
        let ghost = NodeId::new("ghost").expect("node id");
        let rev_before = store.rev();

        let result = store.batch_delete_nodes(&[live.clone(), ghost.clone()]);
        assert_eq!(result, Err(StoreError::NodeNotFound { node_id: ghost }));
        assert!(store.nodes().contains_key(&live));
        assert_eq!(store.rev(), rev_before);
    }
}
