// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Leadline lead-capture service.
//!
//! This crate provides the error type, the common value objects
//! (submissions, engagement snapshots, delivery outcomes), and the
//! [`DeliverySender`] trait that every notification backend implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LeadlineError;
pub use traits::DeliverySender;
pub use types::{
    DeliveryAttempt, DeliveryOutcome, DeliveryReceipt, FormKind, HealthStatus, LeadSnapshot,
    OutboundLead, SessionId, Submission, Temperature,
};
