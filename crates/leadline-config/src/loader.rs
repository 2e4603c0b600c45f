// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leadline.toml` > `~/.config/leadline/leadline.toml` > `/etc/leadline/leadline.toml`
//! with environment variable overrides via `LEADLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LeadlineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadline/leadline.toml` (system-wide)
/// 3. `~/.config/leadline/leadline.toml` (user XDG config)
/// 4. `./leadline.toml` (local directory)
/// 5. `LEADLINE_*` environment variables
pub fn load_config() -> Result<LeadlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadlineConfig::default()))
        .merge(Toml::file("/etc/leadline/leadline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("leadline/leadline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("leadline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LeadlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `LEADLINE_TELEGRAM_BOT_TOKEN`
/// must map to `telegram.bot_token`, not `telegram.bot.token`. Only the
/// leading section prefix is rewritten, so `LEADLINE_DISPATCH_RELAY_URL`
/// maps to `dispatch.relay_url` and not `dispatch.relay.url`.
fn env_provider() -> Env {
    const SECTIONS: [&str; 6] = [
        "site",
        "telegram",
        "relay",
        "dispatch",
        "engagement",
        "tracking",
    ];
    Env::prefixed("LEADLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LEADLINE_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn env_vars_map_into_their_sections() {
        Jail::expect_with(|jail| {
            jail.set_env("LEADLINE_RELAY_PORT", "8080");
            jail.set_env("LEADLINE_TELEGRAM_BOT_TOKEN", "123456:abcdef");
            jail.set_env("LEADLINE_DISPATCH_RELAY_URL", "http://localhost/api/send-telegram");
            let config = load_config().expect("config should load");
            assert_eq!(config.relay.port, 8080);
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:abcdef"));
            assert_eq!(
                config.dispatch.relay_url.as_deref(),
                Some("http://localhost/api/send-telegram")
            );
            Ok(())
        });
    }
}
