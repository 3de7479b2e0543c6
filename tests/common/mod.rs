// SPDX-License-Identifier: MIT

use std::sync::Arc;
use vibe_check::config::Config;
use vibe_check::content::ContentPool;
use vibe_check::db::FirestoreDb;
use vibe_check::routes::create_router;
use vibe_check::services::{CompletionClient, VibeEngine};
use vibe_check::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Completion client pointed at an unreachable endpoint, so every call
/// fails fast and exercises the fallback path.
#[allow(dead_code)]
pub fn unreachable_completion() -> CompletionClient {
    CompletionClient::new("test_api_key".to_string(), "test-model".to_string())
        .with_base_url("http://127.0.0.1:1".to_string())
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the JWT signing key.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Vec<u8>) {
    let config = Config::test_default();
    let signing_key = config.jwt_signing_key.clone();

    let db = test_db_offline();
    let vibe_engine = VibeEngine::new(unreachable_completion(), ContentPool::builtin());

    let state = Arc::new(AppState {
        config,
        db,
        vibe_engine,
    });

    (create_router(state), signing_key)
}

/// Create a valid session JWT for tests, with the claims the auth
/// provider would issue.
#[allow(dead_code)]
pub fn test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        name: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}
