use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tappedout::cli::{report_session_events, run_command, session_store, Cli};
use tappedout::config::Config;
use tappedout::{ApiClient, ConsoleNotifier, Notifier, SessionContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting TappedOut console v{}", env!("CARGO_PKG_VERSION"));

    let session = Arc::new(SessionContext::new(session_store(&config.session)));
    let mut events = session.subscribe();
    let notifier: Arc<dyn Notifier> = if cli.quiet {
        Arc::new(ConsoleNotifier::quiet())
    } else {
        Arc::new(ConsoleNotifier::new())
    };

    let base_url = cli.api_url.as_deref().unwrap_or(&config.api.base_url);
    let api = ApiClient::new(base_url, config.api.timeout(), session, notifier)
        .context("Failed to create API client")?;

    let result = run_command(&cli, &config, &api).await;

    // The console's stand-in for redirecting to the login page
    report_session_events(&mut events);

    result
}
