// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The site error log.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::append_line;

/// One line of the error log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    /// Where the fault happened ("relay", "dispatch", "client").
    pub component: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Append-only JSONL error log.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, component: &str, message: &str, detail: Option<String>) {
        let record = ErrorRecord {
            timestamp: Utc::now(),
            component: component.to_string(),
            message: message.to_string(),
            detail,
        };
        append_line(&self.path, &record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_append_with_component_and_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_errors.log");
        let log = ErrorLog::new(&path);

        log.record("dispatch", "all backends failed", Some("timeout".to_string()));
        log.record("client", "unhandled rejection", None);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ErrorRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.component, "dispatch");
        assert_eq!(first.detail.as_deref(), Some("timeout"));
    }
}
