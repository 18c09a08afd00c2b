// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use smallvec::SmallVec;

use crate::model::handle::{DataType, Handle, HandleDirection, HandlePosition};
use crate::model::ids::{HandleId, NodeId};
use crate::registry::{node_type_config, NodeType};

/// No node type declares more than a few handles, so the derived set fits
/// inline.
pub type DerivedHandles = SmallVec<[Handle; 4]>;

/// Derives the full handle set for a node from its type's registry entry.
///
/// One Input handle per declared input label (data type Any, position Left)
/// and one Output handle per declared output label (position Right), in
/// declaration order. Deterministic and idempotent: the same node id and type
/// always yield byte-identical handles, which is what lets the serializer
/// diff regenerated handles against stored ones.
pub fn derive_handles(node_id: &NodeId, node_type: NodeType) -> DerivedHandles {
    let config = node_type_config(node_type);
    let mut handles = DerivedHandles::new();

    for &label in config.inputs {
        handles.push(Handle {
            id: HandleId::compose(node_id, label),
            node_id: node_id.clone(),
            label,
            direction: HandleDirection::Input,
            data_type: DataType::Any,
            position: Some(HandlePosition::Left),
        });
    }
    for &label in config.outputs {
        handles.push(Handle {
            id: HandleId::compose(node_id, label),
            node_id: node_id.clone(),
            label,
            direction: HandleDirection::Output,
            data_type: DataType::Any,
            position: Some(HandlePosition::Right),
        });
    }

    handles
}
