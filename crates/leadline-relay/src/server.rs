// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state for the relay endpoints the
//! landing page calls.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use leadline_audit::{ConversionLog, ErrorLog};
use leadline_config::LeadlineConfig;
use leadline_core::LeadlineError;
use leadline_telegram::TelegramClient;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<LeadlineConfig>,
    /// Bot API client, absent when no token is configured.
    pub telegram: Option<Arc<TelegramClient>>,
    pub conversions: ConversionLog,
    pub errors: ErrorLog,
}

impl RelayState {
    /// Builds the state from config, wiring the audit logs and the
    /// optional Bot API client.
    pub fn from_config(config: LeadlineConfig) -> Result<Self, LeadlineError> {
        let telegram = match &config.telegram.bot_token {
            Some(token) => Some(Arc::new(TelegramClient::new(
                token.clone(),
                config.telegram.chat_ids.clone(),
                config.telegram.api_base.clone(),
            )?)),
            None => None,
        };
        let conversions = ConversionLog::new(&config.tracking.conversion_log);
        let errors = ErrorLog::new(&config.tracking.error_log);
        Ok(Self {
            config: Arc::new(config),
            telegram,
            conversions,
            errors,
        })
    }
}

/// Builds the relay router with all endpoints and permissive CORS.
///
/// The page is served from a different origin during development, so
/// the relay answers preflight for everyone.
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/api/send-telegram", post(handlers::post_send_telegram))
        .route("/api/track-conversion", post(handlers::post_track_conversion))
        .route("/api/health", get(handlers::get_health))
        .route("/api/services", get(handlers::get_services))
        .route("/api/test-telegram", get(handlers::get_test_telegram))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the relay HTTP server.
pub async fn start_server(state: RelayState) -> Result<(), LeadlineError> {
    let addr = format!("{}:{}", state.config.relay.host, state.config.relay.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LeadlineError::Relay {
            message: format!("failed to bind relay to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Relay server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| LeadlineError::Relay {
            message: format!("relay server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
