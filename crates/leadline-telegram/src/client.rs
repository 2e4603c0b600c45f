// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Telegram Bot API.
//!
//! Notifications fan out to every configured chat id; delivery counts
//! as successful when at least one chat accepts the message.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use leadline_core::LeadlineError;

/// Request body for `sendMessage`.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Envelope every Bot API response uses.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Bot identity returned by `getMe`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub username: Option<String>,
}

/// Outcome of one fan-out: which chats accepted the message.
#[derive(Debug, Clone)]
pub struct FanoutResult {
    /// Chat ids that accepted, with the Telegram message id.
    pub delivered: Vec<(String, i64)>,
    /// Chat ids that refused, with the API description.
    pub failed: Vec<(String, String)>,
}

impl FanoutResult {
    /// At least one chat accepted.
    pub fn any_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

/// Client for the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    token: String,
    chat_ids: Vec<String>,
    api_base: String,
}

impl TelegramClient {
    /// Creates a client for one bot and its recipient chats.
    ///
    /// `api_base` is normally `https://api.telegram.org`; tests point
    /// it at a local mock server.
    pub fn new(
        token: String,
        chat_ids: Vec<String>,
        api_base: String,
    ) -> Result<Self, LeadlineError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| LeadlineError::Delivery {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            token,
            chat_ids,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Sends one HTML-formatted message to every configured chat.
    ///
    /// Individual chat failures are recorded and do not abort the
    /// fan-out; an error is returned only when the request itself
    /// cannot be built or no chat is configured.
    pub async fn send_to_all(&self, text: &str) -> Result<FanoutResult, LeadlineError> {
        if self.chat_ids.is_empty() {
            return Err(LeadlineError::Delivery {
                message: "no telegram chat ids configured".to_string(),
                source: None,
            });
        }

        let mut result = FanoutResult {
            delivered: Vec::new(),
            failed: Vec::new(),
        };

        for chat_id in &self.chat_ids {
            let body = SendMessageRequest {
                chat_id,
                text,
                parse_mode: "HTML",
            };
            match self.send_one(&body).await {
                Ok(message_id) => {
                    debug!(chat_id, message_id, "telegram message delivered");
                    result.delivered.push((chat_id.clone(), message_id));
                }
                Err(description) => {
                    warn!(chat_id, %description, "telegram delivery to chat failed");
                    result.failed.push((chat_id.clone(), description));
                }
            }
        }

        Ok(result)
    }

    async fn send_one(&self, body: &SendMessageRequest<'_>) -> Result<i64, String> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(body)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;

        let status = response.status();
        let parsed: ApiResponse<SentMessage> = response
            .json()
            .await
            .map_err(|e| format!("malformed Bot API response ({status}): {e}"))?;

        if parsed.ok {
            Ok(parsed.result.map(|m| m.message_id).unwrap_or_default())
        } else {
            Err(parsed
                .description
                .unwrap_or_else(|| format!("Bot API returned {status}")))
        }
    }

    /// Calls `getMe`, verifying the token and connectivity.
    pub async fn get_me(&self) -> Result<BotInfo, LeadlineError> {
        let response = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(|e| LeadlineError::Delivery {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let parsed: ApiResponse<BotInfo> =
            response.json().await.map_err(|e| LeadlineError::Delivery {
                message: format!("malformed Bot API response ({status}): {e}"),
                source: Some(Box::new(e)),
            })?;

        match (parsed.ok, parsed.result) {
            (true, Some(info)) => Ok(info),
            _ => Err(LeadlineError::Delivery {
                message: parsed
                    .description
                    .unwrap_or_else(|| format!("getMe failed with {status}")),
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, chat_ids: &[&str]) -> TelegramClient {
        TelegramClient::new(
            "123456:testtoken".to_string(),
            chat_ids.iter().map(|s| s.to_string()).collect(),
            server.uri(),
        )
        .unwrap()
    }

    fn ok_body(message_id: i64) -> serde_json::Value {
        serde_json::json!({"ok": true, "result": {"message_id": message_id}})
    }

    #[tokio::test]
    async fn send_fans_out_to_every_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:testtoken/sendMessage"))
            .and(body_partial_json(serde_json::json!({"parse_mode": "HTML"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(7)))
            .expect(2)
            .mount(&server)
            .await;

        let result = client(&server, &["111", "222"])
            .send_to_all("<b>Нова заявка</b>")
            .await
            .unwrap();
        assert_eq!(result.delivered.len(), 2);
        assert!(result.any_delivered());
    }

    #[tokio::test]
    async fn one_accepting_chat_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:testtoken/sendMessage"))
            .and(body_partial_json(serde_json::json!({"chat_id": "111"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"ok": false, "description": "Bad Request: chat not found"}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bot123456:testtoken/sendMessage"))
            .and(body_partial_json(serde_json::json!({"chat_id": "222"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(9)))
            .mount(&server)
            .await;

        let result = client(&server, &["111", "222"])
            .send_to_all("test")
            .await
            .unwrap();
        assert!(result.any_delivered());
        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0].1.contains("chat not found"));
    }

    #[tokio::test]
    async fn all_chats_refusing_is_not_delivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:testtoken/sendMessage"))
            .respond_with(ResponseTemplate::new(403).set_body_json(
                serde_json::json!({"ok": false, "description": "Forbidden: bot was blocked"}),
            ))
            .mount(&server)
            .await;

        let result = client(&server, &["111"]).send_to_all("test").await.unwrap();
        assert!(!result.any_delivered());
    }

    #[tokio::test]
    async fn no_chat_ids_is_an_error() {
        let server = MockServer::start().await;
        let err = client(&server, &[]).send_to_all("test").await.unwrap_err();
        assert!(err.to_string().contains("chat ids"));
    }

    #[tokio::test]
    async fn get_me_returns_bot_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123456:testtoken/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"ok": true, "result": {"id": 42, "username": "miaxia_bot"}}),
            ))
            .mount(&server)
            .await;

        let info = client(&server, &["111"]).get_me().await.unwrap();
        assert_eq!(info.id, 42);
        assert_eq!(info.username.as_deref(), Some("miaxia_bot"));
    }

    #[tokio::test]
    async fn get_me_propagates_bad_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123456:testtoken/getMe"))
            .respond_with(ResponseTemplate::new(401).set_body_json(
                serde_json::json!({"ok": false, "description": "Unauthorized"}),
            ))
            .mount(&server)
            .await;

        let err = client(&server, &["111"]).get_me().await.unwrap_err();
        assert!(err.to_string().contains("Unauthorized"));
    }
}
