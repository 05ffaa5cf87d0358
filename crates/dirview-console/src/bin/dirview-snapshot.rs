//! Loads the console once against a live backend and prints the page HTML.
//!
//! Configuration comes from the JSON file named by `DIRVIEW_CONFIG`, or from
//! `DIRVIEW_API_URL` with defaults for everything else.

use anyhow::Context;
use dirview_console::ConsoleContext;
use dirview_core::config::ConsoleConfig;
use tracing_subscriber::EnvFilter;

fn load_config() -> anyhow::Result<ConsoleConfig> {
    if let Ok(path) = std::env::var("DIRVIEW_CONFIG") {
        let document = std::fs::read_to_string(&path)
            .with_context(|| format!("reading configuration from {path}"))?;
        return Ok(ConsoleConfig::from_json(&document)?);
    }

    let url = std::env::var("DIRVIEW_API_URL").unwrap_or_else(|_| "http://localhost:5000".into());
    Ok(ConsoleConfig::new(url)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    tracing::info!(api_url = %config.api_url, "loading console snapshot");

    let console = ConsoleContext::connect(config).context("building console API client")?;
    if let Err(err) = console.initialize().await {
        console.report_error(&err);
    }
    console.refresh_status().await;
    console.refresh_logs().await;

    println!("{}", console.render_page());
    console.teardown();
    Ok(())
}
