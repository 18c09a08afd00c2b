// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

/// Node/arrow/person op-application helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_node_op(
    store: &mut GraphStore,
    op: &NodeOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        NodeOp::Add {
            node_id,
            node_type,
            position,
            overrides,
        } => {
            store.add_node_with_id(node_id.clone(), *node_type, *position, overrides.clone())?;
            delta.record_added(EntityRef::Node(node_id.clone()));
            let owned_handles = store
                .handles()
                .values()
                .filter(|handle| &handle.node_id == node_id)
                .map(|handle| handle.id.clone())
                .collect::<Vec<_>>();
            for handle_id in owned_handles {
                delta.record_added(EntityRef::Handle(handle_id));
            }
            Ok(())
        }
        NodeOp::Update { node_id, patch } => {
            if store.update_node(node_id, patch)? {
                delta.record_updated(EntityRef::Node(node_id.clone()));
            }
            Ok(())
        }
        NodeOp::Remove { node_id } => {
            let removal = store.delete_node(node_id)?;
            delta.record_removed(EntityRef::Node(node_id.clone()));
            for (handle_id, _) in removal.handles {
                delta.record_removed(EntityRef::Handle(handle_id));
            }
            for arrow_id in removal.arrows {
                delta.record_removed(EntityRef::Arrow(arrow_id));
            }
            for arrow_id in removal.reinferred {
                delta.record_updated(EntityRef::Arrow(arrow_id));
            }
            Ok(())
        }
    }
}

fn apply_arrow_op(
    store: &mut GraphStore,
    op: &ArrowOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        ArrowOp::Add {
            arrow_id,
            source,
            target,
            label,
            data,
        } => {
            let reinferred = store.add_arrow_with_id(
                arrow_id.clone(),
                source.clone(),
                target.clone(),
                label.clone(),
                data.clone(),
            )?;
            delta.record_added(EntityRef::Arrow(arrow_id.clone()));
            for reinferred_id in reinferred {
                delta.record_updated(EntityRef::Arrow(reinferred_id));
            }
            Ok(())
        }
        ArrowOp::Update { arrow_id, patch } => {
            let update = store.update_arrow(arrow_id, patch)?;
            if update.changed {
                delta.record_updated(EntityRef::Arrow(arrow_id.clone()));
            }
            for reinferred_id in update.reinferred {
                delta.record_updated(EntityRef::Arrow(reinferred_id));
            }
            Ok(())
        }
        ArrowOp::Remove { arrow_id } => {
            let removal = store.delete_arrow(arrow_id)?;
            delta.record_removed(EntityRef::Arrow(arrow_id.clone()));
            for reinferred_id in removal.reinferred {
                delta.record_updated(EntityRef::Arrow(reinferred_id));
            }
            Ok(())
        }
    }
}

fn apply_person_op(
    store: &mut GraphStore,
    op: &PersonOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        PersonOp::Add {
            person_id,
            label,
            llm_config,
        } => {
            store.add_person_with_id(person_id.clone(), label.clone(), llm_config.clone())?;
            delta.record_added(EntityRef::Person(person_id.clone()));
            Ok(())
        }
        PersonOp::Update { person_id, patch } => {
            if store.update_person(person_id, patch)? {
                delta.record_updated(EntityRef::Person(person_id.clone()));
            }
            Ok(())
        }
        PersonOp::Remove { person_id } => {
            let removal = store.delete_person(person_id)?;
            delta.record_removed(EntityRef::Person(person_id.clone()));
            for node_id in removal.cleared_nodes {
                delta.record_updated(EntityRef::Node(node_id));
            }
            Ok(())
        }
    }
}
