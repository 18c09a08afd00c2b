// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! The map-based editing form: graph store, handle derivation, and
//! content-type inference.

pub mod handles;
pub mod infer;
pub mod store;

pub use handles::derive_handles;
pub use infer::{infer_content_type, Inference};
pub use store::{
    ArrowInsertion, ArrowPatch, ArrowRemoval, ArrowUpdate, GraphStore, HandleKey, NodeRemoval,
    PersonPatch, PersonRemoval, Projection, StoreError,
};
