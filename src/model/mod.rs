// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Core data model: branded ids and the diagram entities.

pub mod arrow;
pub mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod handle;
pub mod ids;
pub mod node;
pub mod person;

pub use arrow::{Arrow, ContentType};
pub use diagram::{Diagram, DiagramMetadata};
pub use handle::{DataType, Handle, HandleDirection, HandleLabel, HandlePosition};
pub use ids::{
    ApiKeyId, ArrowId, DiagramId, ExecutionId, HandleId, HandleIdError, Id, IdError, NodeId,
    PersonId,
};
pub use node::{JsonMap, Node, Vec2};
pub use person::{LlmConfig, LlmService, Person};
