// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engagement signals and their score contributions.

use serde::{Deserialize, Serialize};

/// Scroll-depth milestones that earn score, in percent.
pub const SCROLL_MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// One engagement signal reported for a visitor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementEvent {
    /// Another 30 seconds of dwell time elapsed.
    TimeOnSite30s,
    /// A scroll-depth milestone was crossed (25, 50, 75 or 100 percent).
    ScrollMilestone(u8),
    /// The visitor clicked a service card.
    ServiceClick,
    /// The visitor opened a form.
    FormOpen,
    /// The visitor filled a form field.
    FormFieldFill,
    /// The visitor submitted a form.
    FormSubmit,
    /// The cursor left the viewport toward the browser chrome.
    ExitIntent,
    /// The visitor has been here before.
    ReturnVisit,
    /// Any other interaction (click, card draw, hover).
    Interaction,
}

impl EngagementEvent {
    /// Score points this event is worth.
    pub fn points(&self) -> u32 {
        match self {
            EngagementEvent::TimeOnSite30s => 5,
            EngagementEvent::ScrollMilestone(25) => 10,
            EngagementEvent::ScrollMilestone(50) => 20,
            EngagementEvent::ScrollMilestone(75) => 30,
            EngagementEvent::ScrollMilestone(100) => 40,
            EngagementEvent::ScrollMilestone(_) => 1,
            EngagementEvent::ServiceClick => 15,
            EngagementEvent::FormOpen => 25,
            EngagementEvent::FormFieldFill => 50,
            EngagementEvent::FormSubmit => 100,
            EngagementEvent::ExitIntent => 30,
            EngagementEvent::ReturnVisit => 20,
            EngagementEvent::Interaction => 1,
        }
    }

    /// Whether this event counts toward the interaction tally used by
    /// the behavior-based popup trigger.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            EngagementEvent::ServiceClick
                | EngagementEvent::FormOpen
                | EngagementEvent::FormFieldFill
                | EngagementEvent::FormSubmit
                | EngagementEvent::Interaction
        )
    }
}

/// Classify where a visitor came from.
///
/// An explicit `utm_source` always wins; otherwise the referrer host is
/// matched against the known networks, an empty referrer is direct
/// traffic, and anything else is a generic referral.
pub fn classify_source(referrer: &str, utm_source: Option<&str>) -> String {
    if let Some(utm) = utm_source {
        let utm = utm.trim();
        if !utm.is_empty() {
            return utm.to_lowercase();
        }
    }

    let referrer = referrer.trim().to_lowercase();
    if referrer.is_empty() {
        return "direct".to_string();
    }
    if referrer.contains("google") {
        return "google".to_string();
    }
    if referrer.contains("instagram") {
        return "instagram".to_string();
    }
    if referrer.contains("facebook") {
        return "facebook".to_string();
    }
    if referrer.contains("t.me") || referrer.contains("telegram") {
        return "telegram".to_string();
    }
    "referral".to_string()
}
