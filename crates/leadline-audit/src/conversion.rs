// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversion log.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadline_core::{DeliveryOutcome, Submission};

use crate::append_line;

/// One line of the conversion log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub timestamp: DateTime<Utc>,
    /// Form kind as reported by the submission.
    pub form_type: String,
    /// Service key, or "unknown" when the visitor picked none.
    pub service: String,
    /// Conversion value in UAH, 0 when no service was picked.
    pub value: u32,
    pub currency: String,
    /// Lead score at submit time, if analytics were attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub delivered: bool,
    /// Backend that accepted the message, when any did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

/// Append-only JSONL conversion log.
#[derive(Debug, Clone)]
pub struct ConversionLog {
    path: PathBuf,
}

impl ConversionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Records one submission and how its delivery went.
    pub fn record(&self, submission: &Submission, value: u32, outcome: &DeliveryOutcome) {
        let record = ConversionRecord {
            timestamp: Utc::now(),
            form_type: submission.form_kind.to_string(),
            service: submission
                .service
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            value,
            currency: "UAH".to_string(),
            score: submission.analytics.as_ref().map(|a| a.score),
            delivered: outcome.success,
            backend: outcome.backend.clone(),
        };
        append_line(&self.path, &record);
    }

    /// Records a raw client-side conversion ping (the track endpoint).
    pub fn record_raw(&self, service: &str, value: u32) {
        let record = ConversionRecord {
            timestamp: Utc::now(),
            form_type: "client".to_string(),
            service: service.to_string(),
            value,
            currency: "UAH".to_string(),
            score: None,
            delivered: true,
            backend: None,
        };
        append_line(&self.path, &record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_core::{DeliveryAttempt, FormKind};

    fn outcome_ok() -> DeliveryOutcome {
        DeliveryOutcome {
            success: true,
            backend: Some("relay".to_string()),
            attempts: vec![DeliveryAttempt {
                backend: "relay".to_string(),
                success: true,
                detail: None,
            }],
        }
    }

    #[test]
    fn records_append_one_line_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversion-tracking.log");
        let log = ConversionLog::new(&path);

        let mut sub = Submission::new("Олена", "+380501234567", FormKind::Quick);
        sub.service = Some("love".to_string());
        log.record(&sub, 280, &outcome_ok());
        log.record_raw("matrix", 570);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: ConversionRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.service, "love");
        assert_eq!(first.value, 280);
        assert_eq!(first.backend.as_deref(), Some("relay"));
        assert!(first.delivered);

        let second: ConversionRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.form_type, "client");
        assert_eq!(second.currency, "UAH");
    }

    #[test]
    fn missing_service_logs_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversion-tracking.log");
        let log = ConversionLog::new(&path);

        let sub = Submission::new("Олена", "+380501234567", FormKind::Quick);
        log.record(&sub, 0, &DeliveryOutcome::failed());

        let content = std::fs::read_to_string(&path).unwrap();
        let record: ConversionRecord = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(record.service, "unknown");
        assert!(!record.delivered);
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let log = ConversionLog::new("/proc/nonexistent/conversion.log");
        let sub = Submission::new("Олена", "+380501234567", FormKind::Quick);
        log.record(&sub, 0, &DeliveryOutcome::failed());
    }
}
