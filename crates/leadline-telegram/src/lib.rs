// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram Bot API delivery backend for Leadline.
//!
//! Wraps `sendMessage` fan-out to every configured chat and the
//! `getMe` connectivity probe behind the [`DeliverySender`] trait.
//!
//! [`DeliverySender`]: leadline_core::DeliverySender

pub mod client;
pub mod sender;

pub use client::{BotInfo, FanoutResult, TelegramClient};
pub use sender::TelegramSender;
