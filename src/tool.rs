use chrono::Datelike;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::fetch;
use crate::model::ConferenceRecord;
use crate::parser;
use crate::settings::Settings;

/// Tool input. A missing or unparsable year means the current year.
#[derive(Debug, Default, Deserialize)]
pub struct ToolRequest {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<String>,
}

/// Accept the year as a JSON string or number; anything else counts as absent.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            warn!("Ignoring year of unexpected type: {}", other);
            None
        }
    })
}

/// Decode a tool request from raw input. Empty or malformed input is the default request.
pub fn parse_request(input: &str) -> ToolRequest {
    if input.trim().is_empty() {
        return ToolRequest::default();
    }
    serde_json::from_str(input).unwrap_or_else(|e| {
        warn!("Invalid tool request ({}), using defaults", e);
        ToolRequest::default()
    })
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub fn target_year(requested: Option<&str>, current: i32) -> i32 {
    match requested.map(str::trim).filter(|y| !y.is_empty()) {
        Some(y) => y.parse().unwrap_or_else(|_| {
            warn!("Invalid year '{}' requested, falling back to {}", y, current);
            current
        }),
        None => current,
    }
}

pub fn filter_by_year(records: Vec<ConferenceRecord>, year: i32) -> Vec<ConferenceRecord> {
    records.into_iter().filter(|r| r.year == year).collect()
}

/// Parse and filter already-fetched markdown for a tool request.
pub fn conferences_from_markdown(
    markdown: &str,
    request: &ToolRequest,
    current: i32,
) -> Vec<ConferenceRecord> {
    let year = target_year(request.year.as_deref(), current);
    let all = parser::parse(markdown);
    debug!("Parser returned {} conferences before filtering", all.len());

    let filtered = filter_by_year(all, year);
    info!("Returning {} conferences for {}", filtered.len(), year);
    filtered
}

/// Fetch → parse → filter. Fetch failures are logged and yield an empty list.
pub async fn get_conferences(
    client: &Client,
    settings: &Settings,
    request: &ToolRequest,
) -> Vec<ConferenceRecord> {
    match fetch::fetch_markdown(client, &settings.markdown_url).await {
        Ok(markdown) => conferences_from_markdown(&markdown, request, current_year()),
        Err(e) => {
            error!("Could not load conference list: {:#}", e);
            Vec::new()
        }
    }
}

// ── Tests ──
