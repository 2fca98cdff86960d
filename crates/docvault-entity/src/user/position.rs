//! Organizational position and the clearance rank it confers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational positions, ordered by clearance: Director > Manager > Staff.
///
/// A node is visible to a non-owner, non-admin user only when the node's
/// clearance level does not exceed the rank of the viewer's position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_position", rename_all = "lowercase")]
pub enum Position {
    /// Rank 1. The default for new accounts and unknown positions.
    #[default]
    Staff,
    /// Rank 2.
    Manager,
    /// Rank 3.
    Director,
}

impl Position {
    /// Return the clearance rank this position confers (1..=3).
    pub fn clearance_rank(&self) -> i32 {
        match self {
            Self::Staff => 1,
            Self::Manager => 2,
            Self::Director => 3,
        }
    }

    /// Return the position as its display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Manager => "Manager",
            Self::Director => "Director",
        }
    }

    /// Parse leniently: unknown or missing positions rank as Staff.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "director" => Ok(Self::Director),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid position: '{s}'. Expected one of: Staff, Manager, Director"
            ))),
        }
    }
}
