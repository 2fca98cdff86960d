//! # docvault-auth
//!
//! Credential machinery: signed bearer tokens and password hashing. The
//! rest of the system only ever sees the resolved principal; everything in
//! this crate is the black box that produces it.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
