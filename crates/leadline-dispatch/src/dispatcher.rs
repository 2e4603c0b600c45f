// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delivery fallback chain.
//!
//! Senders are walked in configured order and the first success wins.
//! Every attempt lands in the conversion log whether or not any
//! backend accepted, so a fully failed delivery still leaves a trace
//! for manual follow-up.

use metrics::counter;

use leadline_audit::{ConversionLog, ErrorLog};
use leadline_core::{
    DeliveryAttempt, DeliveryOutcome, DeliverySender, OutboundLead, Submission,
};

/// Walks an ordered list of delivery backends.
pub struct Dispatcher {
    senders: Vec<Box<dyn DeliverySender>>,
    conversion_log: ConversionLog,
    error_log: ErrorLog,
}

impl Dispatcher {
    pub fn new(
        senders: Vec<Box<dyn DeliverySender>>,
        conversion_log: ConversionLog,
        error_log: ErrorLog,
    ) -> Self {
        Self {
            senders,
            conversion_log,
            error_log,
        }
    }

    /// Backend names in the order they will be tried.
    pub fn backend_names(&self) -> Vec<&str> {
        self.senders.iter().map(|s| s.name()).collect()
    }

    /// Delivers one submission, trying each backend until one accepts.
    ///
    /// `value` is the conversion value in UAH recorded alongside the
    /// outcome (the picked service's price, or 0).
    pub async fn dispatch(&self, submission: &Submission, text: String, value: u32) -> DeliveryOutcome {
        let lead = OutboundLead {
            text,
            submission: submission.clone(),
        };

        let mut attempts = Vec::new();
        let mut winner: Option<String> = None;

        for sender in &self.senders {
            let backend = sender.name().to_string();
            counter!("leadline_dispatch_attempts_total", "backend" => backend.clone())
                .increment(1);

            match sender.send(&lead).await {
                Ok(receipt) => {
                    counter!("leadline_dispatch_delivered_total", "backend" => backend.clone())
                        .increment(1);
                    tracing::info!(backend = %backend, "lead delivered");
                    attempts.push(DeliveryAttempt {
                        backend: backend.clone(),
                        success: true,
                        detail: receipt.detail,
                    });
                    winner = Some(backend);
                    break;
                }
                Err(err) => {
                    counter!("leadline_dispatch_failed_total", "backend" => backend.clone())
                        .increment(1);
                    tracing::warn!(backend = %backend, %err, "delivery attempt failed, falling back");
                    attempts.push(DeliveryAttempt {
                        backend,
                        success: false,
                        detail: Some(err.to_string()),
                    });
                }
            }
        }

        let outcome = DeliveryOutcome {
            success: winner.is_some(),
            backend: winner,
            attempts,
        };

        if !outcome.success {
            counter!("leadline_dispatch_exhausted_total").increment(1);
            let detail = outcome
                .attempts
                .iter()
                .filter_map(|a| a.detail.clone())
                .collect::<Vec<_>>()
                .join("; ");
            tracing::error!(%detail, "every delivery backend failed");
            self.error_log
                .record("dispatch", "every delivery backend failed", Some(detail));
        }

        self.conversion_log.record(submission, value, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use leadline_core::{DeliveryReceipt, FormKind, HealthStatus, LeadlineError};

    struct FakeSender {
        name: &'static str,
        succeed: bool,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl DeliverySender for FakeSender {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }

        async fn health_check(&self) -> Result<HealthStatus, LeadlineError> {
            Ok(HealthStatus::Healthy)
        }

        async fn send(&self, _lead: &OutboundLead) -> Result<DeliveryReceipt, LeadlineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(DeliveryReceipt {
                    backend: self.name.to_string(),
                    detail: None,
                })
            } else {
                Err(LeadlineError::Delivery {
                    message: "refused".to_string(),
                    source: None,
                })
            }
        }
    }

    fn dispatcher_with(
        senders: Vec<Box<dyn DeliverySender>>,
        dir: &tempfile::TempDir,
    ) -> Dispatcher {
        Dispatcher::new(
            senders,
            ConversionLog::new(dir.path().join("conversion-tracking.log")),
            ErrorLog::new(dir.path().join("site_errors.log")),
        )
    }

    fn fake(name: &'static str, succeed: bool) -> (Box<dyn DeliverySender>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Box::new(FakeSender {
                name,
                succeed,
                calls: calls.clone(),
            }),
            calls,
        )
    }

    fn submission() -> Submission {
        Submission::new("Олена", "+380501234567", FormKind::Quick)
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let (relay, relay_calls) = fake("relay", true);
        let (telegram, telegram_calls) = fake("telegram", true);
        let dispatcher = dispatcher_with(vec![relay, telegram], &dir);

        let outcome = dispatcher.dispatch(&submission(), "text".into(), 0).await;
        assert!(outcome.success);
        assert_eq!(outcome.backend.as_deref(), Some("relay"));
        assert_eq!(relay_calls.load(Ordering::SeqCst), 1);
        assert_eq!(telegram_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fallback_walks_the_chain_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (relay, _) = fake("relay", false);
        let (telegram, _) = fake("telegram", false);
        let (email, _) = fake("email-relay", true);
        let dispatcher = dispatcher_with(vec![relay, telegram, email], &dir);

        let outcome = dispatcher.dispatch(&submission(), "text".into(), 280).await;
        assert!(outcome.success);
        assert_eq!(outcome.backend.as_deref(), Some("email-relay"));
        assert_eq!(outcome.attempts.len(), 3);
        assert!(!outcome.attempts[0].success);
        assert!(!outcome.attempts[1].success);
        assert!(outcome.attempts[2].success);
    }

    #[tokio::test]
    async fn exhausted_chain_logs_conversion_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let (relay, _) = fake("relay", false);
        let dispatcher = dispatcher_with(vec![relay], &dir);

        let outcome = dispatcher.dispatch(&submission(), "text".into(), 0).await;
        assert!(!outcome.success);
        assert!(outcome.backend.is_none());

        let conversions =
            std::fs::read_to_string(dir.path().join("conversion-tracking.log")).unwrap();
        assert_eq!(conversions.lines().count(), 1);
        assert!(conversions.contains("\"delivered\":false"));

        let errors = std::fs::read_to_string(dir.path().join("site_errors.log")).unwrap();
        assert!(errors.contains("every delivery backend failed"));
    }

    #[tokio::test]
    async fn empty_chain_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = dispatcher_with(Vec::new(), &dir);
        let outcome = dispatcher.dispatch(&submission(), "text".into(), 0).await;
        assert!(!outcome.success);
        assert!(outcome.attempts.is_empty());
    }
}
