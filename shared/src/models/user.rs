//! User Model

use serde::{Deserialize, Serialize};

/// Registered raffle participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Trimmed and lower-cased, unique
    pub email: String,
    pub phone: String,
    /// Unix millis
    pub registered_at: i64,
    /// Registration entry plus every entry recorded afterwards
    pub total_entries: i64,
    pub is_active: bool,
}

/// Create user payload (already validated and normalized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Public projection returned by registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub total_entries: i64,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            total_entries: user.total_entries,
        }
    }
}
