// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Leadline service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Leadline configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadlineConfig {
    /// Site identity and logging settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Telegram bot delivery settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Relay HTTP server settings.
    #[serde(default)]
    pub relay: RelayConfig,

    /// Delivery fallback chain settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Engagement scoring and popup trigger thresholds.
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Conversion log and session store paths.
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Consultation service catalog shown by `/api/services` and used
    /// when formatting order notifications.
    #[serde(default = "default_services")]
    pub services: Vec<ServiceConfig>,
}

impl Default for LeadlineConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            telegram: TelegramConfig::default(),
            relay: RelayConfig::default(),
            dispatch: DispatchConfig::default(),
            engagement: EngagementConfig::default(),
            tracking: TrackingConfig::default(),
            services: default_services(),
        }
    }
}

/// Site identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name of the site, used in notification headers.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public domain, included in notification footers.
    #[serde(default = "default_site_domain")]
    pub domain: String,

    /// Deployment environment label ("development" or "production").
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            domain: default_site_domain(),
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_site_name() -> String {
    "MiaxiaLip".to_string()
}

fn default_site_domain() -> String {
    "miaxialip.com.ua".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables direct Telegram delivery.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat ids every notification is fanned out to. Delivery counts as
    /// successful when at least one chat accepts the message.
    #[serde(default)]
    pub chat_ids: Vec<String>,

    /// Bot API base URL; overridden in tests.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_ids: Vec::new(),
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

/// Relay HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Host address to bind the relay server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Delivery fallback chain configuration.
///
/// The dispatcher tries the same-origin relay endpoint first, then the
/// bot API directly, then the email relay. A `None` URL removes that
/// hop from the chain.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Same-origin relay endpoint (`.../api/send-telegram`).
    #[serde(default)]
    pub relay_url: Option<String>,

    /// Secondary email-relay endpoint for the last fallback hop.
    #[serde(default)]
    pub email_relay_url: Option<String>,
}

/// Engagement scoring and popup trigger thresholds.
///
/// One canonical threshold set; the duplicated variants observed in
/// earlier iterations of the page were never reconciled, so these are
/// the wired-in values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngagementConfig {
    /// Minimum seconds on site before the exit-intent popup may fire.
    #[serde(default = "default_exit_min_secs")]
    pub exit_min_secs: u64,

    /// Seconds on site that trigger the time-based popup.
    #[serde(default = "default_time_based_secs")]
    pub time_based_secs: u64,

    /// Interaction count floor for the behavior-based popup.
    #[serde(default = "default_behavior_min_interactions")]
    pub behavior_min_interactions: u32,

    /// Scroll-depth floor (percent) for the behavior-based popup.
    #[serde(default = "default_behavior_min_scroll")]
    pub behavior_min_scroll: u8,

    /// Dwell floor (seconds) for the behavior-based popup.
    #[serde(default = "default_behavior_min_secs")]
    pub behavior_min_secs: u64,

    /// Dwell floor (seconds) for the high-engagement (vip) popup.
    #[serde(default = "default_vip_min_secs")]
    pub vip_min_secs: u64,

    /// Global popup cooldown window in seconds.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            exit_min_secs: default_exit_min_secs(),
            time_based_secs: default_time_based_secs(),
            behavior_min_interactions: default_behavior_min_interactions(),
            behavior_min_scroll: default_behavior_min_scroll(),
            behavior_min_secs: default_behavior_min_secs(),
            vip_min_secs: default_vip_min_secs(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

fn default_exit_min_secs() -> u64 {
    30
}

fn default_time_based_secs() -> u64 {
    180
}

fn default_behavior_min_interactions() -> u32 {
    5
}

fn default_behavior_min_scroll() -> u8 {
    50
}

fn default_behavior_min_secs() -> u64 {
    60
}

fn default_vip_min_secs() -> u64 {
    45
}

fn default_cooldown_secs() -> u64 {
    60
}

/// Conversion log and session store paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingConfig {
    /// Append-only conversion log, one JSON object per line.
    #[serde(default = "default_conversion_log")]
    pub conversion_log: String,

    /// Append-only error log.
    #[serde(default = "default_error_log")]
    pub error_log: String,

    /// JSON session store (drafts, stats, popup cooldown timestamp).
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            conversion_log: default_conversion_log(),
            error_log: default_error_log(),
            store_path: default_store_path(),
        }
    }
}

fn default_conversion_log() -> String {
    "conversion-tracking.log".to_string()
}

fn default_error_log() -> String {
    "site_errors.log".to_string()
}

fn default_store_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("leadline").join("state.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("state.json"))
        .to_string_lossy()
        .into_owned()
}

/// One entry of the consultation service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Catalog key used by forms and the relay ("love", "matrix", ...).
    pub id: String,

    /// Human-readable Ukrainian service name.
    pub name: String,

    /// Current price in UAH.
    pub price: u32,

    /// Pre-discount price in UAH, shown struck through on the page.
    pub original_price: u32,
}

/// The nine consultation services offered on the site.
fn default_services() -> Vec<ServiceConfig> {
    let entries: [(&str, &str, u32, u32); 9] = [
        ("individual", "1 питання", 70, 100),
        ("love", "Любовний прогноз", 280, 350),
        ("career", "Кар'єра і фінанси", 350, 400),
        ("full", "\"Про себе\" (6 питань)", 450, 500),
        ("relationship", "\"Стосунки\" (6 питань)", 390, 450),
        ("business", "\"Бізнес\" (6 питань)", 400, 450),
        ("matrix", "Персональна матриця", 570, 650),
        ("compatibility", "Матриця сумісності", 550, 600),
        ("year", "Аркан на рік", 560, 600),
    ];
    entries
        .into_iter()
        .map(|(id, name, price, original_price)| ServiceConfig {
            id: id.to_string(),
            name: name.to_string(),
            price,
            original_price,
        })
        .collect()
}

impl LeadlineConfig {
    /// Looks up a catalog entry by its key.
    pub fn service(&self, id: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.id == id)
    }
}
