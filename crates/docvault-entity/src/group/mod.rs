//! Organizational group entity.

pub mod model;

pub use model::{CreateGroup, Group, GroupChanges};
