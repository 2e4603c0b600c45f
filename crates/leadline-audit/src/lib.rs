// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit logs.
//!
//! Two files, one JSON object per line: the conversion log records
//! every delivery attempt outcome, the error log records page and
//! server faults. Both are best effort; an unwritable log warns and
//! moves on, because audit must never take down lead capture.

pub mod conversion;
pub mod errors;

pub use conversion::{ConversionLog, ConversionRecord};
pub use errors::{ErrorLog, ErrorRecord};

use std::io::Write;
use std::path::Path;

/// Appends one serialized line to a log file, creating it on first use.
fn append_line(path: &Path, value: &impl serde::Serialize) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %path.display(), %err, "audit log dir create failed");
                return;
            }
        }
    }
    let line = match serde_json::to_string(value) {
        Ok(line) => line,
        Err(err) => {
            tracing::warn!(%err, "audit record serialize failed");
            return;
        }
    };
    let result = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "{line}"));
    if let Err(err) = result {
        tracing::warn!(path = %path.display(), %err, "audit log append failed");
    }
}
