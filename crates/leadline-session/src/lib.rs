// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visitor engagement tracking for the Leadline service.
//!
//! Covers the whole session lifecycle: classifying the traffic source,
//! accumulating a lead score from engagement signals, deciding when to
//! raise a popup, and persisting drafts, stats and captured leads
//! between visits.

pub mod popup;
pub mod session;
pub mod signals;
pub mod store;

pub use popup::{PopupKind, PopupPolicy, PopupSignals};
pub use session::LeadSession;
pub use signals::{classify_source, EngagementEvent};
pub use store::{Draft, SessionStore, StoredLead};
