// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram HTML notification layout.
//!
//! One line per filled field, in a fixed order, with the site footer.
//! Empty optional fields produce no line at all.

use chrono::{FixedOffset, Utc};

use leadline_config::LeadlineConfig;
use leadline_core::{FormKind, Submission, Temperature};

/// Kyiv summer offset. Close enough for a human-read timestamp; the
/// precise instant is in the conversion log.
const KYIV_OFFSET_SECS: i32 = 3 * 3600;

fn form_label(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Quick => "Швидка заявка",
        FormKind::Detailed => "Детальна заявка",
        FormKind::Newsletter => "Підписка на розсилку",
        FormKind::Popup => "Заявка з попапу",
    }
}

/// Escapes the three characters Telegram HTML parse mode treats specially.
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the notification text for one submission.
pub fn format_message(submission: &Submission, config: &LeadlineConfig) -> String {
    let mut message = format!(
        "🔔 <b>Нове замовлення з сайту {}!</b>\n\n",
        escape_html(&config.site.name)
    );

    message += &format!("📋 <b>Форма:</b> {}\n", form_label(submission.form_kind));
    if !submission.name.trim().is_empty() {
        message += &format!("👤 <b>Ім'я:</b> {}\n", escape_html(submission.name.trim()));
    }
    if !submission.phone.trim().is_empty() {
        message += &format!("📱 <b>Телефон:</b> {}\n", escape_html(submission.phone.trim()));
    }
    if let Some(email) = submission.email.as_deref().filter(|v| !v.trim().is_empty()) {
        message += &format!("📧 <b>Email:</b> {}\n", escape_html(email.trim()));
    }
    if let Some(instagram) = submission
        .instagram
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        message += &format!("📸 <b>Instagram:</b> {}\n", escape_html(instagram.trim()));
    }
    if let Some(service) = submission.service.as_deref() {
        // Unknown keys fall back to the raw key with no price.
        match config.service(service) {
            Some(entry) => {
                message += &format!(
                    "🔮 <b>Послуга:</b> {} ({} грн)\n",
                    escape_html(&entry.name),
                    entry.price
                );
            }
            None => {
                message += &format!("🔮 <b>Послуга:</b> {}\n", escape_html(service));
            }
        }
    }
    if let Some(birthdate) = submission
        .birthdate
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        message += &format!("🎂 <b>Дата народження:</b> {}\n", escape_html(birthdate.trim()));
    }
    if let Some(question) = submission
        .question
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        message += &format!("❓ <b>Питання:</b> {}\n", escape_html(question.trim()));
    }

    if let Some(analytics) = &submission.analytics {
        let temperature = Temperature::from_score(analytics.score);
        message += &format!(
            "📊 <b>Оцінка ліда:</b> {} ({})\n",
            analytics.score, temperature
        );
        message += &format!("🔗 <b>Джерело:</b> {}\n", escape_html(&analytics.source));
    }

    message += "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
    message += &format!("\n🌐 <b>Сайт:</b> {}", escape_html(&config.site.domain));
    let kyiv = FixedOffset::east_opt(KYIV_OFFSET_SECS).expect("valid offset");
    message += &format!(
        "\n📅 <b>Дата подачі:</b> {}",
        Utc::now().with_timezone(&kyiv).format("%d.%m.%Y, %H:%M")
    );

    message
}
