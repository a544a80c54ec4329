use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::settings::Settings;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// GET the conference list and return its raw markdown.
pub async fn fetch_markdown(client: &Client, url: &str) -> Result<String> {
    info!("Fetching conference markdown: {}", url);
    let start = Instant::now();

    let body = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to fetch {}", url))?
        .text()
        .await
        .context("Failed to read markdown body")?;

    info!(
        "Fetched {} bytes in {}ms",
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}
