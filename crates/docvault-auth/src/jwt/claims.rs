//! JWT claims structure embedded in access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::user::{Position, UserRole};

/// Claims payload of every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Username at issuance time.
    pub username: String,
    /// Role at issuance time.
    pub role: UserRole,
    /// Position at issuance time.
    pub position: Position,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
