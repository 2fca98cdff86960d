//! Node tree operations.

pub mod deletion;
pub mod listing;
pub mod service;
pub mod tree;

pub use deletion::DeletionEngine;
pub use listing::ListingService;
pub use service::NodeService;
pub use tree::CycleGuard;
