// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Same-origin HTTP relay for the Leadline landing page.
//!
//! The page cannot hold the bot token, so it posts submissions here
//! and the relay fans them out to Telegram. Also serves the service
//! catalog, health, and conversion tracking endpoints.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, RelayState};
