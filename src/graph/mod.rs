//! Resource relationship graph
//!
//! Resources indexed by key, directed relationship edges between them, and
//! the service groups produced by the grouping pass.

pub mod builder;
pub mod grouping;
pub mod store;
pub mod store_models;

pub use builder::{default_graph_builder, GraphBuilder};
pub use grouping::group_resources;
pub use store::ResourceGraph;
pub use store_models::{Relationship, RelationshipType, ResourceGroup};
