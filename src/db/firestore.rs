// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles, admin flag, locked score)
//! - Daily vibes (one fortune record per user per day)
//!
//! Timestamps are stored as fixed-width RFC3339 strings so range filters
//! compare chronologically.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DailyVibe, User};
use crate::time_utils::{days_ago_rfc3339, start_of_today_rfc3339};
use futures_util::{stream, StreamExt};

/// Number of days of history shown to users.
pub const HISTORY_DAYS: i64 = 7;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their auth provider ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List all users, newest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a user document.
    ///
    /// The caller is responsible for removing the user's vibes first
    /// (see [`Self::delete_user_vibes`]).
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Toggle the admin flag on a user.
    pub async fn set_admin_flag(&self, user_id: &str, is_admin: bool) -> Result<User, AppError> {
        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        user.is_admin = is_admin;
        user.updated_at = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
        self.upsert_user(&user).await?;
        Ok(user)
    }

    /// Set or clear a user's locked score.
    pub async fn set_locked_score(
        &self,
        user_id: &str,
        score: Option<u8>,
    ) -> Result<User, AppError> {
        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        user.locked_score = score;
        user.updated_at = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
        self.upsert_user(&user).await?;
        Ok(user)
    }

    // ─── Vibe Operations ─────────────────────────────────────────

    /// Get a user's vibe for the current UTC calendar day, if any.
    pub async fn get_today_vibe(&self, user_id: &str) -> Result<Option<DailyVibe>, AppError> {
        let user_id = user_id.to_string();
        let day_start = start_of_today_rfc3339();

        let vibes: Vec<DailyVibe> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_VIBES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("created_at").greater_than_or_equal(day_start.clone()),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(vibes.into_iter().next())
    }

    /// Persist a new vibe record.
    pub async fn insert_vibe(&self, vibe: &DailyVibe) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_VIBES)
            .document_id(&vibe.id)
            .object(vibe)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a user's vibes for the last [`HISTORY_DAYS`] days, newest first.
    pub async fn get_history(&self, user_id: &str) -> Result<Vec<DailyVibe>, AppError> {
        let user_id = user_id.to_string();
        let window_start = days_ago_rfc3339(HISTORY_DAYS);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_VIBES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("created_at")
                        .greater_than_or_equal(window_start.clone()),
                ])
            })
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all of a user's vibes, newest first (admin view).
    pub async fn get_user_vibes(&self, user_id: &str) -> Result<Vec<DailyVibe>, AppError> {
        let user_id = user_id.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_VIBES)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a single vibe by ID.
    pub async fn delete_vibe(&self, vibe_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::DAILY_VIBES)
            .document_id(vibe_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a user's vibe for today, re-enabling play (admin reset).
    ///
    /// Returns the number of records removed.
    pub async fn delete_today_vibe(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted = 0;
        // Normally at most one record exists; loop to clean up any
        // duplicates left by best-effort gating.
        while let Some(vibe) = self.get_today_vibe(user_id).await? {
            self.delete_vibe(&vibe.id).await?;
            deleted += 1;
        }
        Ok(deleted)
    }

    /// Delete all of a user's vibes (part of account deletion).
    ///
    /// Uses concurrent deletes with a limit to avoid overloading Firestore.
    pub async fn delete_user_vibes(&self, user_id: &str) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let vibes = self.get_user_vibes(user_id).await?;
        let count = vibes.len();

        stream::iter(vibes)
            .map(|vibe| async move {
                client
                    .fluent()
                    .delete()
                    .from(collections::DAILY_VIBES)
                    .document_id(&vibe.id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(count)
    }
}
