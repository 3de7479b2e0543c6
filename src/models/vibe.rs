//! Daily vibe models.

use serde::{Deserialize, Serialize};

/// One daily fortune record, as stored in Firestore.
///
/// At most one exists per (non-admin user, UTC calendar day); that rule is
/// enforced by the entitlement gate, not by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyVibe {
    /// Document ID (UUID v4)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
    /// Luck score in 0..=100
    pub luck_score: u8,
    /// Fortune text shown to the user
    pub fortune_text: String,
    /// Color palette (3 in normal operation; consumers tolerate 0..N)
    pub colors: Vec<String>,
    /// Song recommendation
    pub song: String,
}

/// Transient engine output, persisted as a [`DailyVibe`] once the
/// entitlement gate allows it.
#[derive(Debug, Clone, PartialEq)]
pub struct VibeResult {
    pub luck_score: u8,
    pub fortune_text: String,
    pub colors: Vec<String>,
    pub song: String,
}
