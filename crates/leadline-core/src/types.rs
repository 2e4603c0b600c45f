// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Leadline workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for one visitor session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Which form variant produced a submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Minimal form: name + phone.
    Quick,
    /// Full form: name + phone + instagram + birthdate + question.
    Detailed,
    /// Mailing-list form: name + email.
    Newsletter,
    /// Popup-raised form: name + phone + optional email.
    Popup,
}

/// Coarse engagement tier derived from the accumulated lead score.
///
/// Thresholds: score >= 80 is `Vip`, >= 60 `Hot`, >= 40 `Warm`, else `Cold`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Cold,
    Warm,
    Hot,
    Vip,
}

impl Temperature {
    /// Classifies a lead score into a temperature tier.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Temperature::Vip,
            s if s >= 60 => Temperature::Hot,
            s if s >= 40 => Temperature::Warm,
            _ => Temperature::Cold,
        }
    }
}

/// Snapshot of a visitor session's engagement signals, embedded into
/// each submission at submit time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSnapshot {
    /// Accumulated lead score at submit time.
    pub score: u32,
    /// Seconds spent on the site.
    pub time_on_site_secs: u64,
    /// Maximum scroll depth observed, 0-100.
    pub scroll_percent: u8,
    /// Cumulative interaction count (clicks, field fills, card draws).
    pub interactions: u32,
    /// Classified traffic source ("google", "instagram", "direct", ...).
    pub source: String,
}

/// A validated form submission, assembled at submit time.
///
/// Invariant: `name` and `phone` have passed field validation before a
/// `Submission` is constructed; optional fields are `None` rather than
/// empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Service catalog key ("love", "matrix", ...), if the visitor picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "formType")]
    pub form_kind: FormKind,
    /// Engagement signals captured when the visitor hit submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<LeadSnapshot>,
}

impl Submission {
    /// Creates a submission carrying only the required fields.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, form_kind: FormKind) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            instagram: None,
            birthdate: None,
            question: None,
            service: None,
            form_kind,
            analytics: None,
        }
    }
}

/// Outcome of one delivery try against one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// Backend identifier ("relay", "telegram", "email-relay").
    pub backend: String,
    pub success: bool,
    /// Raw response or error string, for the conversion log only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Aggregate result of walking the delivery fallback chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub success: bool,
    /// Backend that accepted the message, when any did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Every attempt made, in order.
    pub attempts: Vec<DeliveryAttempt>,
}

impl DeliveryOutcome {
    /// A failure outcome with no attempts recorded.
    pub fn failed() -> Self {
        Self {
            success: false,
            backend: None,
            attempts: Vec::new(),
        }
    }
}

/// Receipt returned by a sender that accepted a message.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// Backend identifier, mirrors `DeliverySender::name`.
    pub backend: String,
    /// Backend-specific detail (message id, response excerpt).
    pub detail: Option<String>,
}

/// Health status reported by sender health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Sender is fully operational.
    Healthy,
    /// Sender is operational but experiencing issues.
    Degraded(String),
    /// Sender is not operational.
    Unhealthy(String),
}

/// A message handed to delivery senders: the formatted text block plus
/// the structured submission for backends that re-format themselves.
#[derive(Debug, Clone)]
pub struct OutboundLead {
    /// Human-readable text block (Telegram HTML layout).
    pub text: String,
    /// The structured submission the text was rendered from.
    pub submission: Submission,
}
