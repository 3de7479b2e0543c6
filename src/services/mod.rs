// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod completion;
pub mod entitlement;
pub mod vibe;

pub use completion::{AiVibe, CompletionClient};
pub use entitlement::{check_entitlement, Entitlement};
pub use vibe::VibeEngine;
