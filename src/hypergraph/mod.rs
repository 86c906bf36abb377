// CHLA - Contextual Hypergraph
// mod.rs - Module exports for context keys and the relation store
//
// Relations here are strictly pairwise: every "hyperedge" joins exactly
// two contexts.
//
// Copyright (c) 2026 CIPS Corps. All rights reserved.

pub mod context;
pub mod store;

pub use context::{context_pairs, labels, ContextLabel, ContextPair};
pub use store::{RelationStats, RelationStore};
