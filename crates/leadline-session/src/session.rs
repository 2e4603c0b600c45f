// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-visitor session state: accumulated score and engagement signals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadline_core::{LeadSnapshot, SessionId, Temperature};

use crate::signals::{EngagementEvent, SCROLL_MILESTONES};

/// Mutable state of one visitor session.
///
/// Invariant: `score` never decreases. Milestone and dwell events are
/// deduplicated here so callers can report raw signals without
/// worrying about double counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSession {
    pub id: SessionId,
    score: u32,
    time_on_site_secs: u64,
    scroll_percent: u8,
    interactions: u32,
    source: String,
    /// 30-second dwell blocks already credited.
    dwell_blocks_scored: u64,
    /// Scroll milestones already credited.
    milestones_scored: Vec<u8>,
}

impl LeadSession {
    /// Starts a fresh session with a classified traffic source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: SessionId(Uuid::new_v4().to_string()),
            score: 0,
            time_on_site_secs: 0,
            scroll_percent: 0,
            interactions: 0,
            source: source.into(),
            dwell_blocks_scored: 0,
            milestones_scored: Vec::new(),
        }
    }

    /// Starts a session for a visitor who has been here before.
    pub fn returning(source: impl Into<String>) -> Self {
        let mut session = Self::new(source);
        session.record(EngagementEvent::ReturnVisit);
        session
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_on_site_secs(&self) -> u64 {
        self.time_on_site_secs
    }

    pub fn scroll_percent(&self) -> u8 {
        self.scroll_percent
    }

    pub fn interactions(&self) -> u32 {
        self.interactions
    }

    pub fn temperature(&self) -> Temperature {
        Temperature::from_score(self.score)
    }

    /// Records one engagement event, crediting its points.
    pub fn record(&mut self, event: EngagementEvent) {
        self.score = self.score.saturating_add(event.points());
        if event.is_interaction() {
            self.interactions = self.interactions.saturating_add(1);
        }
        tracing::debug!(
            session = %self.id.0,
            ?event,
            score = self.score,
            "engagement event recorded"
        );
    }

    pub fn track_service_click(&mut self) {
        self.record(EngagementEvent::ServiceClick);
    }

    pub fn track_form_open(&mut self) {
        self.record(EngagementEvent::FormOpen);
    }

    pub fn track_form_field_fill(&mut self) {
        self.record(EngagementEvent::FormFieldFill);
    }

    pub fn track_form_submit(&mut self) {
        self.record(EngagementEvent::FormSubmit);
    }

    pub fn track_exit_intent(&mut self) {
        self.record(EngagementEvent::ExitIntent);
    }

    /// Advances the dwell clock, crediting 5 points per full 30-second
    /// block crossed.
    pub fn tick(&mut self, elapsed_secs: u64) {
        self.time_on_site_secs = self.time_on_site_secs.saturating_add(elapsed_secs);
        let blocks = self.time_on_site_secs / 30;
        while self.dwell_blocks_scored < blocks {
            self.dwell_blocks_scored += 1;
            self.record(EngagementEvent::TimeOnSite30s);
        }
    }

    /// Reports the current scroll depth, crediting newly crossed
    /// milestones. Scrolling back up never reduces the recorded depth.
    pub fn track_scroll(&mut self, percent: u8) {
        let percent = percent.min(100);
        if percent <= self.scroll_percent {
            return;
        }
        self.scroll_percent = percent;
        for milestone in SCROLL_MILESTONES {
            if percent >= milestone && !self.milestones_scored.contains(&milestone) {
                self.milestones_scored.push(milestone);
                self.record(EngagementEvent::ScrollMilestone(milestone));
            }
        }
    }

    /// Freezes the current signals into the snapshot embedded in
    /// submissions and stored leads.
    pub fn snapshot(&self) -> LeadSnapshot {
        LeadSnapshot {
            score: self.score,
            time_on_site_secs: self.time_on_site_secs,
            scroll_percent: self.scroll_percent,
            interactions: self.interactions,
            source: self.source.clone(),
        }
    }
}
