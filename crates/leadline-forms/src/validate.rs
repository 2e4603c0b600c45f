// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field validators with the Ukrainian messages shown on the page.
//!
//! Every validator returns `None` when the value passes, or the message
//! to display under the field. Validation collects every failing field
//! rather than stopping at the first.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use leadline_core::FormKind;

/// Cyrillic and Latin letters plus the characters names legitimately
/// contain (apostrophe, hyphen, space).
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[а-яА-ЯіІїЇєЄa-zA-Z\s'-]+$").expect("name regex"));

/// Ukrainian numbers in any of the three common prefixes.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+380|380|0)[0-9]{9}$").expect("phone regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// One failed field with its display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Strips the separators visitors type into phone numbers.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

pub fn validate_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Ім'я є обов'язковим".to_string());
    }
    if trimmed.chars().count() < 2 {
        return Some("Ім'я повинно містити мінімум 2 символи".to_string());
    }
    if !NAME_RE.is_match(trimmed) {
        return Some("Ім'я містить недопустимі символи".to_string());
    }
    None
}

pub fn validate_phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Телефон є обов'язковим".to_string());
    }
    if !PHONE_RE.is_match(&normalize_phone(value)) {
        return Some("Невірний формат телефону".to_string());
    }
    None
}

/// Email is only required on the newsletter form; elsewhere an empty
/// value passes and a non-empty one must still parse.
pub fn validate_email(value: &str, required: bool) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if required {
            return Some("Email є обов'язковим".to_string());
        }
        return None;
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Some("Невірний формат email".to_string());
    }
    None
}

pub fn validate_instagram(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('@') {
        return Some("Instagram має починатися з @".to_string());
    }
    None
}

pub fn validate_birthdate(value: &str, today: NaiveDate) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Дата народження є обов'язковою".to_string());
    }
    let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") else {
        return Some("Перевірте правильність дати".to_string());
    };
    if date > today {
        return Some("Дата не може бути в майбутньому".to_string());
    }
    if today.years_since(date).unwrap_or(0) > 100 {
        return Some("Перевірте правильність дати".to_string());
    }
    None
}

pub fn validate_question(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Питання є обов'язковим".to_string());
    }
    if trimmed.chars().count() < 10 {
        return Some("Питання занадто коротке (мінімум 10 символів)".to_string());
    }
    None
}

/// Validates one field by name in the context of a form variant.
pub fn validate_field(kind: FormKind, field: &str, value: &str, today: NaiveDate) -> Option<String> {
    match field {
        "name" => validate_name(value),
        "phone" => validate_phone(value),
        "email" => validate_email(value, kind == FormKind::Newsletter),
        "instagram" => validate_instagram(value),
        "birthdate" => validate_birthdate(value, today),
        "question" => validate_question(value),
        _ => None,
    }
}

/// Validates a whole form, collecting every failing field.
pub fn validate_form(
    kind: FormKind,
    value_of: impl Fn(&str) -> String,
    today: NaiveDate,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    for field in crate::fields::fields_for(kind) {
        let value = value_of(field.name);
        if let Some(message) = validate_field(kind, field.name, &value, today) {
            errors.push(FieldError::new(field.name, message));
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
