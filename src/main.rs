// SPDX-License-Identifier: MIT

//! Vibe-Check API Server
//!
//! Daily fortune backend: one AI-or-random generated vibe per user per day,
//! with a 7-day history and an admin panel for user management and
//! deterministic score testing.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_check::{
    config::Config,
    content::ContentPool,
    db::FirestoreDb,
    services::{CompletionClient, VibeEngine},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment; missing credentials abort here.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Vibe-Check API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Validate the fallback content pool; an empty tone bucket would make
    // fallback generation impossible for some scores.
    let content = ContentPool::builtin();
    content
        .validate()
        .expect("Fallback content pool is misconfigured");
    tracing::info!(
        fortunes = content.fortune_count(),
        songs = content.song_count(),
        "Content pool loaded"
    );

    // Initialize the completion client and generation engine
    let completion = CompletionClient::new(config.groq_api_key.clone(), config.groq_model.clone());
    tracing::info!(model = %config.groq_model, "Completion client initialized");

    let vibe_engine = VibeEngine::new(completion, content);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        vibe_engine,
    });

    // Build router
    let app = vibe_check::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vibe_check=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
