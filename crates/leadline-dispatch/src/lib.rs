// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery dispatch for Leadline.
//!
//! Renders the Telegram HTML notification, then walks the fallback
//! chain (same-origin relay, direct Bot API, email relay) until one
//! backend accepts. Every outcome lands in the conversion log.

pub mod dispatcher;
pub mod message;
pub mod senders;

pub use dispatcher::Dispatcher;
pub use message::format_message;
pub use senders::{EmailRelaySender, RelaySender};
