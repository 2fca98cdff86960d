//! # docvault-entity
//!
//! Domain entity models for DocVault: the node tree, users, and
//! organizational groups. All row-backed structs derive `sqlx::FromRow`
//! and enums map onto Postgres enum types.

pub mod group;
pub mod node;
pub mod user;
