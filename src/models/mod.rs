// SPDX-License-Identifier: MIT

//! Data models for storage and API.

pub mod user;
pub mod vibe;

pub use user::User;
pub use vibe::{DailyVibe, VibeResult};
