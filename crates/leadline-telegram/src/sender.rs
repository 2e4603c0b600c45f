// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`DeliverySender`] implementation backed by the Bot API client.

use async_trait::async_trait;

use leadline_config::TelegramConfig;
use leadline_core::{DeliveryReceipt, DeliverySender, HealthStatus, LeadlineError, OutboundLead};

use crate::client::TelegramClient;

/// Direct Bot API delivery, the second hop in the fallback chain.
#[derive(Debug, Clone)]
pub struct TelegramSender {
    client: TelegramClient,
}

impl TelegramSender {
    /// Builds the sender from config. Returns `None` when no bot token
    /// is configured, which removes this hop from the chain.
    pub fn from_config(config: &TelegramConfig) -> Result<Option<Self>, LeadlineError> {
        let Some(token) = &config.bot_token else {
            return Ok(None);
        };
        let client = TelegramClient::new(
            token.clone(),
            config.chat_ids.clone(),
            config.api_base.clone(),
        )?;
        Ok(Some(Self { client }))
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }
}

#[async_trait]
impl DeliverySender for TelegramSender {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadlineError> {
        match self.client.get_me().await {
            Ok(info) => {
                tracing::debug!(bot_id = info.id, "telegram health check ok");
                Ok(HealthStatus::Healthy)
            }
            Err(err) => Ok(HealthStatus::Unhealthy(err.to_string())),
        }
    }

    async fn send(&self, lead: &OutboundLead) -> Result<DeliveryReceipt, LeadlineError> {
        let result = self.client.send_to_all(&lead.text).await?;
        if result.any_delivered() {
            let ids: Vec<String> = result
                .delivered
                .iter()
                .map(|(chat, id)| format!("{chat}:{id}"))
                .collect();
            Ok(DeliveryReceipt {
                backend: self.name().to_string(),
                detail: Some(ids.join(",")),
            })
        } else {
            let reasons: Vec<String> = result
                .failed
                .iter()
                .map(|(chat, why)| format!("{chat}: {why}"))
                .collect();
            Err(LeadlineError::Delivery {
                message: format!("all chats refused: {}", reasons.join("; ")),
                source: None,
            })
        }
    }
}
