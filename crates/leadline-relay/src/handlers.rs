// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the relay API.
//!
//! Handles POST /api/send-telegram, POST /api/track-conversion,
//! GET /api/health, GET /api/services, GET /api/test-telegram.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};

use leadline_core::{FormKind, Submission};
use leadline_dispatch::format_message;

use crate::server::RelayState;

/// Request body for POST /api/send-telegram.
///
/// The page posts the raw form fields; only name and phone are
/// required, and the form kind defaults to quick when omitted.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, rename = "formType")]
    pub form_type: Option<FormKind>,
    #[serde(default)]
    pub analytics: Option<leadline_core::LeadSnapshot>,
}

/// One chat's outcome in the send response.
#[derive(Debug, Serialize)]
pub struct ChatResult {
    pub chat_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

fn error_response(
    status: StatusCode,
    error: &str,
    details: Option<serde_json::Value>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

/// Relay-level validation, looser than the page's field validation:
/// only length floors, so manual API callers get sane errors too.
fn validate_send(body: &SendRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if body.name.trim().chars().count() < 2 {
        errors.push("Ім'я повинно містити мінімум 2 символи".to_string());
    }
    if body.phone.trim().chars().count() < 10 {
        errors.push("Телефон повинен містити мінімум 10 цифр".to_string());
    }
    errors
}

/// POST /api/send-telegram
///
/// Validates the form fields, renders the notification, and fans it
/// out to every configured chat. Counts as success when at least one
/// chat accepts.
pub async fn post_send_telegram(
    State(state): State<RelayState>,
    Json(body): Json<SendRequest>,
) -> Response {
    counter!("leadline_relay_send_requests_total").increment(1);

    let validation_errors = validate_send(&body);
    if !validation_errors.is_empty() {
        counter!("leadline_relay_send_rejected_total").increment(1);
        return error_response(
            StatusCode::BAD_REQUEST,
            "Помилки валідації",
            Some(serde_json::json!(validation_errors)),
        );
    }

    let mut submission = Submission::new(
        body.name.trim(),
        body.phone.trim(),
        body.form_type.unwrap_or(FormKind::Quick),
    );
    submission.email = body.email.filter(|v| !v.trim().is_empty());
    submission.instagram = body.instagram.filter(|v| !v.trim().is_empty());
    submission.service = body.service.filter(|v| !v.trim().is_empty());
    submission.birthdate = body.birthdate.filter(|v| !v.trim().is_empty());
    submission.question = body.question.filter(|v| !v.trim().is_empty());
    submission.analytics = body.analytics;

    let value = submission
        .service
        .as_deref()
        .and_then(|id| state.config.service(id))
        .map(|s| s.price)
        .unwrap_or(0);

    let Some(telegram) = &state.telegram else {
        state
            .errors
            .record("relay", "send-telegram called with no bot configured", None);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Помилка відправки повідомлення",
            None,
        );
    };

    let text = format_message(&submission, &state.config);
    let fanout = match telegram.send_to_all(&text).await {
        Ok(fanout) => fanout,
        Err(err) => {
            state
                .errors
                .record("relay", "telegram fan-out failed", Some(err.to_string()));
            state
                .conversions
                .record(&submission, value, &leadline_core::DeliveryOutcome::failed());
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Помилка відправки повідомлення",
                None,
            );
        }
    };

    let mut results: Vec<ChatResult> = fanout
        .delivered
        .iter()
        .map(|(chat_id, message_id)| ChatResult {
            chat_id: chat_id.clone(),
            success: true,
            detail: Some(format!("message_id {message_id}")),
        })
        .collect();
    results.extend(fanout.failed.iter().map(|(chat_id, why)| ChatResult {
        chat_id: chat_id.clone(),
        success: false,
        detail: Some(why.clone()),
    }));

    let outcome = leadline_core::DeliveryOutcome {
        success: fanout.any_delivered(),
        backend: fanout.any_delivered().then(|| "telegram".to_string()),
        attempts: results
            .iter()
            .map(|r| leadline_core::DeliveryAttempt {
                backend: format!("telegram:{}", r.chat_id),
                success: r.success,
                detail: r.detail.clone(),
            })
            .collect(),
    };
    state.conversions.record(&submission, value, &outcome);

    if fanout.any_delivered() {
        counter!("leadline_relay_send_delivered_total").increment(1);
        let service_info = submission
            .service
            .as_deref()
            .and_then(|id| state.config.service(id));
        Json(serde_json::json!({
            "success": true,
            "message": format!(
                "Повідомлення відправлено {} користувачам!",
                fanout.delivered.len()
            ),
            "details": results,
            "service": service_info,
        }))
        .into_response()
    } else {
        counter!("leadline_relay_send_failed_total").increment(1);
        state.errors.record(
            "relay",
            "no chat accepted the notification",
            Some(format!("{} chats tried", results.len())),
        );
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Помилка відправки всім користувачам",
            Some(serde_json::to_value(results).unwrap_or_default()),
        )
    }
}

/// Request body for POST /api/track-conversion.
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub service: Option<String>,
}

/// POST /api/track-conversion
///
/// Records a client-side conversion ping in the conversion log.
pub async fn post_track_conversion(
    State(state): State<RelayState>,
    Json(body): Json<TrackRequest>,
) -> Response {
    counter!("leadline_relay_conversions_total").increment(1);
    let service = body.service.as_deref().unwrap_or("unknown");
    state.conversions.record_raw(service, body.value);
    Json(serde_json::json!({"success": true, "tracked": true})).into_response()
}

/// GET /api/health
pub async fn get_health(State(state): State<RelayState>) -> Response {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.site.environment,
        "services_count": state.config.services.len(),
        "telegram_bot": if state.telegram.is_some() { "Configured" } else { "Not configured" },
        "chat_ids": state.config.telegram.chat_ids,
    }))
    .into_response()
}

/// GET /api/services
///
/// Returns the catalog keyed by service id, the shape the page's
/// pricing section consumes.
pub async fn get_services(State(state): State<RelayState>) -> Response {
    let services: BTreeMap<&str, serde_json::Value> = state
        .config
        .services
        .iter()
        .map(|s| {
            (
                s.id.as_str(),
                serde_json::json!({
                    "name": s.name,
                    "price": s.price,
                    "originalPrice": s.original_price,
                }),
            )
        })
        .collect();
    Json(serde_json::json!({"success": true, "services": services})).into_response()
}

/// GET /api/test-telegram
///
/// Probes the bot token via `getMe`.
pub async fn get_test_telegram(State(state): State<RelayState>) -> Response {
    let Some(telegram) = &state.telegram else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Telegram бот не налаштовано",
            None,
        );
    };

    match telegram.get_me().await {
        Ok(bot) => Json(serde_json::json!({
            "success": true,
            "bot": {"id": bot.id, "username": bot.username},
            "chat_ids": state.config.telegram.chat_ids,
            "message": "Бот активний!",
        }))
        .into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string(), None),
    }
}
