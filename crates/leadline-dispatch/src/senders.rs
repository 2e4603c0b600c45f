// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP relay senders: the same-origin relay hop and the email relay
//! fallback. Both POST the structured submission as JSON and treat a
//! 2xx response with `"success": true` as accepted.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use leadline_core::{DeliveryReceipt, DeliverySender, HealthStatus, LeadlineError, OutboundLead};

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn build_client() -> Result<reqwest::Client, LeadlineError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|e| LeadlineError::Relay {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

async fn post_submission(
    client: &reqwest::Client,
    url: &str,
    lead: &OutboundLead,
) -> Result<Option<String>, LeadlineError> {
    let response = client
        .post(url)
        .json(&lead.submission)
        .send()
        .await
        .map_err(|e| LeadlineError::Relay {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LeadlineError::Relay {
            message: format!("relay returned {status}: {body}"),
            source: None,
        });
    }

    let parsed: RelayResponse = response.json().await.map_err(|e| LeadlineError::Relay {
        message: format!("malformed relay response: {e}"),
        source: Some(Box::new(e)),
    })?;

    if parsed.success {
        Ok(None)
    } else {
        Err(LeadlineError::Relay {
            message: parsed
                .error
                .unwrap_or_else(|| "relay reported failure".to_string()),
            source: None,
        })
    }
}

/// Derives the relay's health endpoint from its submit endpoint.
fn health_url(submit_url: &str) -> Option<String> {
    submit_url
        .rfind("/api/")
        .map(|idx| format!("{}/api/health", &submit_url[..idx]))
}

/// The same-origin relay endpoint, the first hop in the chain.
pub struct RelaySender {
    client: reqwest::Client,
    url: String,
}

impl RelaySender {
    pub fn new(url: String) -> Result<Self, LeadlineError> {
        Ok(Self {
            client: build_client()?,
            url,
        })
    }
}

#[async_trait]
impl DeliverySender for RelaySender {
    fn name(&self) -> &str {
        "relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadlineError> {
        let Some(url) = health_url(&self.url) else {
            return Ok(HealthStatus::Degraded(
                "no health endpoint derivable from relay url".to_string(),
            ));
        };
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Unhealthy(format!(
                "health endpoint returned {}",
                response.status()
            ))),
            Err(err) => Ok(HealthStatus::Unhealthy(err.to_string())),
        }
    }

    async fn send(&self, lead: &OutboundLead) -> Result<DeliveryReceipt, LeadlineError> {
        let detail = post_submission(&self.client, &self.url, lead).await?;
        Ok(DeliveryReceipt {
            backend: self.name().to_string(),
            detail,
        })
    }
}

/// The email relay, the last hop in the chain.
pub struct EmailRelaySender {
    client: reqwest::Client,
    url: String,
}

impl EmailRelaySender {
    pub fn new(url: String) -> Result<Self, LeadlineError> {
        Ok(Self {
            client: build_client()?,
            url,
        })
    }
}

#[async_trait]
impl DeliverySender for EmailRelaySender {
    fn name(&self) -> &str {
        "email-relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadlineError> {
        // The email relay has no probe endpoint; reachability is only
        // known at send time.
        Ok(HealthStatus::Degraded("no health endpoint".to_string()))
    }

    async fn send(&self, lead: &OutboundLead) -> Result<DeliveryReceipt, LeadlineError> {
        let detail = post_submission(&self.client, &self.url, lead).await?;
        Ok(DeliveryReceipt {
            backend: self.name().to_string(),
            detail,
        })
    }
}
