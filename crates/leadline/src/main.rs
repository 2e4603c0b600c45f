// SPDX-FileCopyrightText: 2026 Leadline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leadline - lead-capture relay for the MiaxiaLip landing page.
//!
//! This is the binary entry point for the relay server and its
//! operational tooling.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use leadline_core::{DeliverySender, HealthStatus};
use leadline_dispatch::{EmailRelaySender, RelaySender};
use leadline_telegram::TelegramSender;

/// Leadline - lead-capture relay and engagement tooling.
#[derive(Parser, Debug)]
#[command(name = "leadline", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the relay HTTP server.
    Serve,
    /// Print the resolved configuration.
    Config,
    /// Health-check every configured delivery backend.
    Doctor,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},leadline=debug")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the configured delivery chain in fallback order.
fn build_senders(
    config: &leadline_config::LeadlineConfig,
) -> Result<Vec<Box<dyn DeliverySender>>, leadline_core::LeadlineError> {
    let mut senders: Vec<Box<dyn DeliverySender>> = Vec::new();
    if let Some(url) = &config.dispatch.relay_url {
        senders.push(Box::new(RelaySender::new(url.clone())?));
    }
    if let Some(sender) = TelegramSender::from_config(&config.telegram)? {
        senders.push(Box::new(sender));
    }
    if let Some(url) = &config.dispatch.email_relay_url {
        senders.push(Box::new(EmailRelaySender::new(url.clone())?));
    }
    Ok(senders)
}

async fn run_doctor(config: &leadline_config::LeadlineConfig) -> i32 {
    let senders = match build_senders(config) {
        Ok(senders) => senders,
        Err(err) => {
            eprintln!("doctor: failed to build delivery chain: {err}");
            return 1;
        }
    };

    if senders.is_empty() {
        println!("doctor: no delivery backends configured");
        return 1;
    }

    let mut exit = 0;
    for sender in &senders {
        match sender.health_check().await {
            Ok(HealthStatus::Healthy) => {
                println!("{:<12} ok", sender.name());
            }
            Ok(HealthStatus::Degraded(why)) => {
                println!("{:<12} degraded: {why}", sender.name());
            }
            Ok(HealthStatus::Unhealthy(why)) => {
                println!("{:<12} UNHEALTHY: {why}", sender.name());
                exit = 1;
            }
            Err(err) => {
                println!("{:<12} check failed: {err}", sender.name());
                exit = 1;
            }
        }
    }
    exit
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match leadline_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            leadline_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.site.log_level);
    tracing::info!(
        site = %config.site.name,
        environment = %config.site.environment,
        "config loaded"
    );

    match cli.command {
        Some(Commands::Serve) => {
            let state = match leadline_relay::RelayState::from_config(config) {
                Ok(state) => state,
                Err(err) => {
                    eprintln!("leadline: failed to initialize relay: {err}");
                    std::process::exit(1);
                }
            };
            if let Err(err) = leadline_relay::start_server(state).await {
                eprintln!("leadline: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => {
                eprintln!("leadline: failed to render config: {err}");
                std::process::exit(1);
            }
        },
        Some(Commands::Doctor) => {
            std::process::exit(run_doctor(&config).await);
        }
        None => {
            println!("leadline: use --help for available commands");
        }
    }
}
