// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-file session store.
//!
//! Persists what the page keeps between visits: form drafts, per-day
//! submission stats, captured leads, and the popup cooldown timestamp.
//! Writes are best effort; a failed save is logged at warn and never
//! propagated, because losing a draft must not break the page.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use leadline_core::{FormKind, LeadSnapshot, Submission, Temperature};

/// A saved partial form, restored when the visitor reopens the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// Field name to entered value.
    pub fields: BTreeMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

/// A captured lead with its engagement context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLead {
    pub submission: Submission,
    pub snapshot: LeadSnapshot,
    pub temperature: Temperature,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    /// Drafts keyed by form kind.
    #[serde(default)]
    drafts: BTreeMap<String, Draft>,
    /// Submission counts keyed by ISO date, then form kind.
    #[serde(default)]
    stats: BTreeMap<String, BTreeMap<String, u32>>,
    #[serde(default)]
    leads: Vec<StoredLead>,
    /// When the last popup was raised, unix seconds.
    #[serde(default)]
    last_popup_epoch_secs: Option<u64>,
}

/// File-backed store for session state that outlives one visit.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: StoreState,
}

impl SessionStore {
    /// Opens the store, starting empty when the file is missing or
    /// unreadable. A corrupt file is logged and replaced on next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "session store corrupt, starting empty");
                    StoreState::default()
                }
            },
            Err(_) => StoreState::default(),
        };
        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the store to disk, best effort.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %self.path.display(), %err, "session store dir create failed");
                return;
            }
        }
        let json = match serde_json::to_string_pretty(&self.state) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "session store serialize failed");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %err, "session store write failed");
        }
    }

    /// Saves a partial form under its kind, replacing any older draft.
    pub fn save_draft(&mut self, kind: FormKind, fields: BTreeMap<String, String>) {
        self.state.drafts.insert(
            kind.to_string(),
            Draft {
                fields,
                saved_at: Utc::now(),
            },
        );
        self.save();
    }

    pub fn draft(&self, kind: FormKind) -> Option<&Draft> {
        self.state.drafts.get(&kind.to_string())
    }

    /// Drops the draft for a kind, called after a successful submit.
    pub fn clear_draft(&mut self, kind: FormKind) {
        if self.state.drafts.remove(&kind.to_string()).is_some() {
            self.save();
        }
    }

    /// Records a captured lead and bumps today's counter for its form.
    pub fn record_lead(&mut self, submission: Submission, snapshot: LeadSnapshot) {
        let today = Utc::now().date_naive().to_string();
        let kind = submission.form_kind.to_string();
        *self
            .state
            .stats
            .entry(today)
            .or_default()
            .entry(kind)
            .or_insert(0) += 1;
        self.state.leads.push(StoredLead {
            temperature: Temperature::from_score(snapshot.score),
            submission,
            snapshot,
            captured_at: Utc::now(),
        });
        self.save();
    }

    /// Submission count for one date and form kind.
    pub fn count_for(&self, date: NaiveDate, kind: FormKind) -> u32 {
        self.state
            .stats
            .get(&date.to_string())
            .and_then(|by_kind| by_kind.get(&kind.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Every captured lead, oldest first.
    pub fn leads(&self) -> &[StoredLead] {
        &self.state.leads
    }

    /// Leads captured on the given date.
    pub fn leads_on(&self, date: NaiveDate) -> Vec<&StoredLead> {
        self.state
            .leads
            .iter()
            .filter(|lead| lead.captured_at.date_naive() == date)
            .collect()
    }

    /// Leads whose score reached the hot tier (60 and up).
    pub fn hot_leads(&self) -> Vec<&StoredLead> {
        self.state
            .leads
            .iter()
            .filter(|lead| lead.snapshot.score >= 60)
            .collect()
    }

    /// Stamps the popup cooldown clock.
    pub fn mark_popup_shown(&mut self, epoch_secs: u64) {
        self.state.last_popup_epoch_secs = Some(epoch_secs);
        self.save();
    }

    pub fn last_popup_shown(&self) -> Option<u64> {
        self.state.last_popup_epoch_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("state.json"));
        (dir, store)
    }

    fn snapshot(score: u32) -> LeadSnapshot {
        LeadSnapshot {
            score,
            time_on_site_secs: 90,
            scroll_percent: 60,
            interactions: 4,
            source: "instagram".to_string(),
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let (_dir, store) = temp_store();
        assert!(store.leads().is_empty());
        assert!(store.last_popup_shown().is_none());
    }

    #[test]
    fn drafts_round_trip_across_reopen() {
        let (dir, mut store) = temp_store();
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "Олена".to_string());
        fields.insert("phone".to_string(), "+38050".to_string());
        store.save_draft(FormKind::Detailed, fields);

        let reopened = SessionStore::open(dir.path().join("state.json"));
        let draft = reopened.draft(FormKind::Detailed).unwrap();
        assert_eq!(draft.fields.get("name").unwrap(), "Олена");
        assert!(reopened.draft(FormKind::Quick).is_none());
    }

    #[test]
    fn clear_draft_removes_only_that_kind() {
        let (_dir, mut store) = temp_store();
        store.save_draft(FormKind::Quick, BTreeMap::new());
        store.save_draft(FormKind::Popup, BTreeMap::new());
        store.clear_draft(FormKind::Quick);
        assert!(store.draft(FormKind::Quick).is_none());
        assert!(store.draft(FormKind::Popup).is_some());
    }

    #[test]
    fn record_lead_bumps_todays_counter() {
        let (_dir, mut store) = temp_store();
        let sub = Submission::new("Олена", "+380501234567", FormKind::Quick);
        store.record_lead(sub.clone(), snapshot(30));
        store.record_lead(sub, snapshot(30));
        let today = Utc::now().date_naive();
        assert_eq!(store.count_for(today, FormKind::Quick), 2);
        assert_eq!(store.count_for(today, FormKind::Detailed), 0);
        assert_eq!(store.leads_on(today).len(), 2);
    }

    #[test]
    fn hot_leads_filter_at_sixty() {
        let (_dir, mut store) = temp_store();
        let sub = Submission::new("Олена", "+380501234567", FormKind::Quick);
        store.record_lead(sub.clone(), snapshot(59));
        store.record_lead(sub.clone(), snapshot(60));
        store.record_lead(sub, snapshot(95));
        let hot = store.hot_leads();
        assert_eq!(hot.len(), 2);
        assert_eq!(hot[1].temperature, Temperature::Vip);
    }

    #[test]
    fn popup_timestamp_survives_reopen() {
        let (dir, mut store) = temp_store();
        store.mark_popup_shown(1700000000);
        let reopened = SessionStore::open(dir.path().join("state.json"));
        assert_eq!(reopened.last_popup_shown(), Some(1700000000));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = SessionStore::open(&path);
        assert!(store.leads().is_empty());
    }
}
