// SPDX-License-Identifier: MIT

//! Vibe-Check: daily fortune backend.
//!
//! This crate provides the API for a daily "fortune check" app: a user
//! submits a mood once per calendar day and receives a luck score, fortune
//! text, color palette, and song recommendation, generated via an AI
//! completion call with a local random fallback.

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod luck;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::VibeEngine;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub vibe_engine: VibeEngine,
}
