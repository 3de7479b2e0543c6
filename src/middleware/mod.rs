// SPDX-License-Identifier: MIT

//! Axum middleware: authentication, admin gating, security headers.

pub mod admin;
pub mod auth;
pub mod security;
