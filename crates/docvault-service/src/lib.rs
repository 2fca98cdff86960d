//! # docvault-service
//!
//! Business logic for DocVault. The node tree operations live here: the
//! access evaluator, the cycle guard, the recursive deletion engine, the
//! access-filtered listing engine, and the single-shot mutation services,
//! plus the group tree and user account services.

pub mod access;
pub mod context;
pub mod group;
pub mod node;
pub mod user;

pub use context::RequestContext;
