use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_MARKDOWN_URL: &str =
    "https://raw.githubusercontent.com/javaconferences/javaconferences.github.io/main/README.md";
const DEFAULT_TIMEOUT_SECS: i64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub markdown_url: String,
    pub timeout_secs: u64,
}

/// Defaults, then `JAVACONF_*` environment variables, then the CLI `--url` override.
pub fn load(url_override: Option<String>) -> Result<Settings> {
    Config::builder()
        .set_default("markdown_url", DEFAULT_MARKDOWN_URL)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .add_source(Environment::with_prefix("JAVACONF").try_parsing(true))
        .set_override_option("markdown_url", url_override)?
        .build()
        .context("Failed to build settings")?
        .try_deserialize()
        .context("Invalid settings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let s = load(Some("http://localhost:8080/list.md".into())).unwrap();
        assert_eq!(s.markdown_url, "http://localhost:8080/list.md");
        assert!(s.timeout_secs > 0);
    }
}
