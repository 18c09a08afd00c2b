// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! dipeo-core — diagram graph consistency and handle resolution for DiPeO.
//!
//! This crate is the editing core behind the DiPeO visual workflow editor:
//! branded identifiers, the node-type registry, handle derivation, the graph
//! store with cascading mutations, content-type inference for arrows, and the
//! serializer between the map-based editing form and the array-based native
//! wire form. The rendering, GraphQL, and server layers live elsewhere and
//! consume this crate.

pub mod graph;
pub mod model;
pub mod ops;
pub mod registry;
pub mod store;
pub mod wire;
