// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Popup trigger policy.
//!
//! Four popup kinds share one cooldown window and per-kind show-once
//! latches. Evaluation order is fixed: exit-intent beats
//! high-engagement beats behavior-based beats time-based, so the most
//! specific trigger wins when several are eligible at once.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use leadline_config::EngagementConfig;
use leadline_core::LeadSnapshot;

/// The popup variants the page can raise.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PopupKind {
    /// Raised when the cursor leaves the viewport after a minimum dwell.
    ExitIntent,
    /// Raised after a fixed dwell time.
    TimeBased,
    /// Raised when interactions, scroll depth and dwell all clear floors.
    BehaviorBased,
    /// Raised for visitors whose score already reached the vip tier.
    HighEngagement,
}

/// Signals fed into one policy evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopupSignals {
    /// The cursor just left the viewport toward the browser chrome.
    pub exit_intent: bool,
    /// The tab is currently visible. Hidden tabs never get popups.
    pub page_visible: bool,
    /// A form field is focused or holds text. Interrupting someone who
    /// is typing loses the lead, so all popups are suppressed.
    pub form_active: bool,
}

/// Decides which popup, if any, to raise for a session.
///
/// Each kind fires at most once per session; all kinds share a global
/// cooldown so two popups never stack within the window.
#[derive(Debug, Clone)]
pub struct PopupPolicy {
    config: EngagementConfig,
    shown: Vec<PopupKind>,
    open: Option<PopupKind>,
    last_shown_epoch_secs: Option<u64>,
}

impl PopupPolicy {
    pub fn new(config: EngagementConfig) -> Self {
        Self {
            config,
            shown: Vec::new(),
            open: None,
            last_shown_epoch_secs: None,
        }
    }

    /// Seeds the cooldown clock from persisted state, so a reload does
    /// not reset the window.
    pub fn with_last_shown(mut self, epoch_secs: Option<u64>) -> Self {
        self.last_shown_epoch_secs = epoch_secs;
        self
    }

    /// When the last popup was raised, if any.
    pub fn last_shown(&self) -> Option<u64> {
        self.last_shown_epoch_secs
    }

    /// Whether a kind has already fired this session.
    pub fn has_shown(&self, kind: PopupKind) -> bool {
        self.shown.contains(&kind)
    }

    /// The popup currently on screen, if any.
    pub fn open(&self) -> Option<PopupKind> {
        self.open
    }

    /// Marks the open popup dismissed. Latches stay set.
    pub fn close(&mut self) {
        self.open = None;
    }

    fn in_cooldown(&self, now_epoch_secs: u64) -> bool {
        match self.last_shown_epoch_secs {
            Some(last) => now_epoch_secs.saturating_sub(last) < self.config.cooldown_secs,
            None => false,
        }
    }

    fn eligible(&self, kind: PopupKind, snapshot: &LeadSnapshot, signals: PopupSignals) -> bool {
        if self.has_shown(kind) {
            return false;
        }
        match kind {
            PopupKind::ExitIntent => {
                signals.exit_intent && snapshot.time_on_site_secs > self.config.exit_min_secs
            }
            PopupKind::HighEngagement => {
                snapshot.score >= 80 && snapshot.time_on_site_secs >= self.config.vip_min_secs
            }
            PopupKind::BehaviorBased => {
                snapshot.interactions >= self.config.behavior_min_interactions
                    && snapshot.scroll_percent >= self.config.behavior_min_scroll
                    && snapshot.time_on_site_secs > self.config.behavior_min_secs
            }
            PopupKind::TimeBased => snapshot.time_on_site_secs >= self.config.time_based_secs,
        }
    }

    /// Evaluates the policy, latching and returning the popup to raise.
    pub fn evaluate(
        &mut self,
        snapshot: &LeadSnapshot,
        signals: PopupSignals,
        now_epoch_secs: u64,
    ) -> Option<PopupKind> {
        if !signals.page_visible
            || signals.form_active
            || self.open.is_some()
            || self.in_cooldown(now_epoch_secs)
        {
            return None;
        }

        let order = [
            PopupKind::ExitIntent,
            PopupKind::HighEngagement,
            PopupKind::BehaviorBased,
            PopupKind::TimeBased,
        ];
        let kind = order
            .into_iter()
            .find(|&kind| self.eligible(kind, snapshot, signals))?;

        self.shown.push(kind);
        self.open = Some(kind);
        self.last_shown_epoch_secs = Some(now_epoch_secs);
        tracing::debug!(%kind, score = snapshot.score, "popup raised");
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible() -> PopupSignals {
        PopupSignals {
            exit_intent: false,
            page_visible: true,
            form_active: false,
        }
    }

    fn exit() -> PopupSignals {
        PopupSignals {
            exit_intent: true,
            page_visible: true,
            form_active: false,
        }
    }

    fn snapshot(score: u32, secs: u64, scroll: u8, interactions: u32) -> LeadSnapshot {
        LeadSnapshot {
            score,
            time_on_site_secs: secs,
            scroll_percent: scroll,
            interactions,
            source: "direct".to_string(),
        }
    }

    fn policy() -> PopupPolicy {
        PopupPolicy::new(EngagementConfig::default())
    }

    #[test]
    fn exit_intent_requires_minimum_dwell() {
        let mut p = policy();
        assert_eq!(p.evaluate(&snapshot(0, 30, 0, 0), exit(), 1000), None);
        assert_eq!(
            p.evaluate(&snapshot(0, 31, 0, 0), exit(), 1000),
            Some(PopupKind::ExitIntent)
        );
    }

    #[test]
    fn each_kind_fires_once_per_session() {
        let mut p = policy();
        assert_eq!(
            p.evaluate(&snapshot(0, 31, 0, 0), exit(), 1000),
            Some(PopupKind::ExitIntent)
        );
        p.close();
        // Out of cooldown and dismissed, same signal again: the latch blocks it.
        assert_eq!(p.evaluate(&snapshot(0, 200, 0, 0), exit(), 2000), None);
    }

    #[test]
    fn time_based_fires_at_three_minutes() {
        let mut p = policy();
        assert_eq!(p.evaluate(&snapshot(0, 179, 0, 0), visible(), 1000), None);
        assert_eq!(
            p.evaluate(&snapshot(0, 180, 0, 0), visible(), 1000),
            Some(PopupKind::TimeBased)
        );
    }

    #[test]
    fn behavior_based_needs_all_three_floors() {
        let mut p = policy();
        // Interactions and scroll fine, dwell not over the floor.
        assert_eq!(p.evaluate(&snapshot(0, 60, 50, 5), visible(), 1000), None);
        assert_eq!(
            p.evaluate(&snapshot(0, 61, 50, 5), visible(), 1000),
            Some(PopupKind::BehaviorBased)
        );
    }

    #[test]
    fn high_engagement_beats_behavior_and_time() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        assert_eq!(
            p.evaluate(&snap, visible(), 1000),
            Some(PopupKind::HighEngagement)
        );
    }

    #[test]
    fn exit_intent_wins_over_everything() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        assert_eq!(p.evaluate(&snap, exit(), 1000), Some(PopupKind::ExitIntent));
    }

    #[test]
    fn cooldown_blocks_the_next_popup() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        assert_eq!(p.evaluate(&snap, exit(), 1000), Some(PopupKind::ExitIntent));
        p.close();
        // 59 seconds later: still cooling down.
        assert_eq!(p.evaluate(&snap, visible(), 1059), None);
        // 60 seconds later: next kind fires.
        assert_eq!(
            p.evaluate(&snap, visible(), 1060),
            Some(PopupKind::HighEngagement)
        );
    }

    #[test]
    fn only_one_popup_open_at_a_time() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        assert_eq!(p.evaluate(&snap, exit(), 1000), Some(PopupKind::ExitIntent));
        assert_eq!(p.open(), Some(PopupKind::ExitIntent));
        // Still on screen, way past the cooldown: nothing else opens.
        assert_eq!(p.evaluate(&snap, visible(), 5000), None);
        p.close();
        assert_eq!(
            p.evaluate(&snap, visible(), 5000),
            Some(PopupKind::HighEngagement)
        );
    }

    #[test]
    fn active_form_suppresses_all_popups() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        let typing = PopupSignals {
            exit_intent: true,
            page_visible: true,
            form_active: true,
        };
        assert_eq!(p.evaluate(&snap, typing, 1000), None);
    }

    #[test]
    fn hidden_tab_never_gets_a_popup() {
        let mut p = policy();
        let snap = snapshot(85, 200, 80, 10);
        let hidden = PopupSignals {
            exit_intent: true,
            page_visible: false,
            form_active: false,
        };
        assert_eq!(p.evaluate(&snap, hidden, 1000), None);
    }

    #[test]
    fn persisted_cooldown_survives_policy_restart() {
        let mut p = policy().with_last_shown(Some(1000));
        let snap = snapshot(0, 180, 0, 0);
        assert_eq!(p.evaluate(&snap, visible(), 1030), None);
        assert_eq!(
            p.evaluate(&snap, visible(), 1061),
            Some(PopupKind::TimeBased)
        );
    }
}
