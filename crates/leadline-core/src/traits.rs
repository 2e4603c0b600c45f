// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delivery-sender trait implemented by every notification backend.

use async_trait::async_trait;

use crate::error::LeadlineError;
use crate::types::{DeliveryReceipt, HealthStatus, OutboundLead};

/// A best-effort delivery backend (same-origin relay, direct bot API,
/// email relay).
///
/// The dispatcher walks an ordered list of senders and stops at the
/// first one whose `send` succeeds. Senders must not retry internally;
/// "send once, best effort" is the contract.
#[async_trait]
pub trait DeliverySender: Send + Sync + 'static {
    /// Returns the backend identifier recorded in delivery attempts.
    fn name(&self) -> &str;

    /// Returns the semantic version of this sender implementation.
    fn version(&self) -> semver::Version;

    /// Performs a connectivity check against the backend.
    async fn health_check(&self) -> Result<HealthStatus, LeadlineError>;

    /// Attempts to deliver one lead notification.
    async fn send(&self, lead: &OutboundLead) -> Result<DeliveryReceipt, LeadlineError>;
}
