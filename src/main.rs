use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use beacon::beacon::{CapturingBeacon, HttpBeacon};
use beacon::config::{BootstrapConfig, Config};
use beacon::environment::StaticPage;
use beacon::identity::MemorySessionStore;
use beacon::{bootstrap, Tracker};

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Send a page-view beacon to a collector", long_about = None)]
struct Cli {
    /// Page configuration as JSON: {"id": 3, "host": "...", "options": {...}}
    /// Overrides BEACON_SITE_ID / BEACON_HOST and the option variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address of the page being viewed
    #[arg(long)]
    url: Url,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Referring document
    #[arg(long)]
    referrer: Option<String>,

    /// Raw do-not-track preference ("1", "yes", "0", "no", ...)
    #[arg(long)]
    do_not_track: Option<String>,

    /// Raw do-not-track preference from the legacy source
    #[arg(long)]
    legacy_do_not_track: Option<String>,

    /// Generate a fresh visitor id for every page view
    #[arg(long)]
    no_session_store: bool,

    /// Print the collector URL instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    let page_config = match &cli.config {
        Some(path) => Some(BootstrapConfig::from_file(path)?),
        None => config.bootstrap.clone(),
    };
    info!("Loaded configuration");

    let mut page = StaticPage::new(cli.url.clone());
    if let Some(title) = &cli.title {
        page = page.with_title(title);
    }
    if let Some(referrer) = &cli.referrer {
        page = page.with_referrer(referrer);
    }
    if let Some(value) = &cli.do_not_track {
        page = page.with_do_not_track(value);
    }
    if let Some(value) = &cli.legacy_do_not_track {
        page = page.with_legacy_do_not_track(value);
    }
    let page = Arc::new(page);

    let with_session = |tracker: Tracker| {
        if cli.no_session_store {
            tracker
        } else {
            tracker.with_session_store(Arc::new(MemorySessionStore::new()))
        }
    };

    if cli.dry_run {
        let capture = Arc::new(CapturingBeacon::new());
        let tracker = with_session(Tracker::new(page, capture.clone()));
        bootstrap(page_config.as_ref(), &tracker);

        for url in capture.urls() {
            println!("{url}");
        }
        return Ok(());
    }

    let (http_beacon, dispatcher) =
        HttpBeacon::spawn(&config.dispatch).context("failed to start beacon dispatcher")?;

    // The tracker holds the only handle; dropping it lets the dispatcher drain
    {
        let tracker = with_session(Tracker::new(page, Arc::new(http_beacon)));
        bootstrap(page_config.as_ref(), &tracker);
    }

    let drain = Duration::from_secs(config.dispatch.timeout_secs + 1);
    match tokio::time::timeout(drain, dispatcher).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Beacon dispatcher failed"),
        Err(_) => warn!("Beacon still in flight at exit, abandoning it"),
    }

    Ok(())
}
