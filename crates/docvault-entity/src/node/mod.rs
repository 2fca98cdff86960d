//! Node entity — files and folders in the hierarchical store.

pub mod model;

pub use model::{CreateNode, Node, NodeChanges, NodeKind, NodeListing};
