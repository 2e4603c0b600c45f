// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, token shape, and catalog
//! consistency.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::LeadlineConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LeadlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate relay.host is not empty
    if config.relay.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "relay.host must not be empty".to_string(),
        });
    }

    // Validate relay.host looks like a valid IP or hostname
    if !config.relay.host.trim().is_empty() {
        let addr = config.relay.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("relay.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    // A bot token without chat ids (or vice versa) can never deliver
    if let Some(token) = &config.telegram.bot_token {
        if !token.contains(':') {
            errors.push(ConfigError::Validation {
                message: "telegram.bot_token does not look like a Bot API token \
                          (expected `<numeric id>:<secret>`)"
                    .to_string(),
            });
        }
        if config.telegram.chat_ids.is_empty() {
            errors.push(ConfigError::Validation {
                message: "telegram.bot_token is set but telegram.chat_ids is empty".to_string(),
            });
        }
    }

    if config.engagement.behavior_min_scroll > 100 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engagement.behavior_min_scroll must be 0-100, got {}",
                config.engagement.behavior_min_scroll
            ),
        });
    }

    if config.tracking.conversion_log.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "tracking.conversion_log must not be empty".to_string(),
        });
    }

    if config.tracking.store_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "tracking.store_path must not be empty".to_string(),
        });
    }

    // Validate no duplicate service ids
    let mut seen_ids = HashSet::new();
    for service in &config.services {
        if !seen_ids.insert(&service.id) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate service id `{}` in [[services]] array", service.id),
            });
        }
    }

    for (i, service) in config.services.iter().enumerate() {
        if service.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("services[{i}].id must not be empty"),
            });
        }
        if service.original_price < service.price {
            errors.push(ConfigError::Validation {
                message: format!(
                    "services[{i}] (`{}`): original_price {} is below price {}",
                    service.id, service.original_price, service.price
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
