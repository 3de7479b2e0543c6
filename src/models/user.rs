//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Auth provider subject (also used as document ID)
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub username: String,
    /// Admin flag: unlimited plays and access to the admin endpoints
    pub is_admin: bool,
    /// Admin-assigned score override, replaces random score generation
    pub locked_score: Option<u8>,
    /// When the user first logged in (RFC3339)
    pub created_at: String,
    /// Last login refresh or admin edit (RFC3339)
    pub updated_at: String,
}
