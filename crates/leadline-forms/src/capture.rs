// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft-aware form capture flow.
//!
//! A [`FormCapture`] is one open form: it restores the saved draft,
//! persists every keystroke batch back to the store, feeds engagement
//! events into the session, and on submit turns the raw fields into a
//! validated [`Submission`] with the engagement snapshot attached.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};

use leadline_core::{FormKind, Submission};
use leadline_session::signals::EngagementEvent;
use leadline_session::{LeadSession, SessionStore};

use crate::validate::{normalize_phone, validate_form, FieldError};

/// One open form instance.
#[derive(Debug)]
pub struct FormCapture {
    kind: FormKind,
    fields: BTreeMap<String, String>,
    /// Fields that already earned the fill event.
    filled: BTreeSet<String>,
}

impl FormCapture {
    /// Opens a form, restoring its draft and crediting the open event.
    pub fn open(kind: FormKind, store: &SessionStore, session: &mut LeadSession) -> Self {
        session.record(EngagementEvent::FormOpen);
        let fields = store
            .draft(kind)
            .map(|draft| draft.fields.clone())
            .unwrap_or_default();
        if !fields.is_empty() {
            tracing::debug!(form = %kind, fields = fields.len(), "draft restored");
        }
        Self {
            kind,
            fields,
            filled: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Records a field value, persisting the draft and crediting the
    /// first non-empty fill of each field.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
        store: &mut SessionStore,
        session: &mut LeadSession,
    ) {
        let value = value.into();
        if !value.trim().is_empty() && self.filled.insert(name.to_string()) {
            session.record(EngagementEvent::FormFieldFill);
        }
        self.fields.insert(name.to_string(), value);
        store.save_draft(self.kind, self.fields.clone());
    }

    /// Validates and assembles the submission.
    ///
    /// On success the draft is cleared, the submit event credited, and
    /// the lead recorded in the store. Validation failures leave the
    /// draft intact so the visitor can fix and resubmit.
    pub fn submit(
        self,
        store: &mut SessionStore,
        session: &mut LeadSession,
    ) -> Result<Submission, Vec<FieldError>> {
        self.submit_on(store, session, Utc::now().date_naive())
    }

    /// `submit` with an injected date for birthdate validation.
    pub fn submit_on(
        self,
        store: &mut SessionStore,
        session: &mut LeadSession,
        today: NaiveDate,
    ) -> Result<Submission, Vec<FieldError>> {
        validate_form(
            self.kind,
            |name| self.fields.get(name).cloned().unwrap_or_default(),
            today,
        )?;

        session.record(EngagementEvent::FormSubmit);

        let take = |name: &str| -> Option<String> {
            self.fields
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut submission = Submission::new(
            take("name").unwrap_or_default(),
            normalize_phone(&take("phone").unwrap_or_default()),
            self.kind,
        );
        submission.email = take("email");
        submission.instagram = take("instagram");
        submission.birthdate = take("birthdate");
        submission.question = take("question");
        submission.service = take("service");
        submission.analytics = Some(session.snapshot());

        store.clear_draft(self.kind);
        store.record_lead(submission.clone(), session.snapshot());
        tracing::info!(form = %self.kind, score = session.score(), "lead captured");

        Ok(submission)
    }
}
