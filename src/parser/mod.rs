pub mod fields;
pub mod inline;
pub mod rows;
pub mod sections;

use markdown::{to_mdast, Constructs, ParseOptions};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::model::ConferenceRecord;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("markdown parse failed: {0}")]
    Markdown(String),
}

/// CommonMark plus GFM tables. Other GFM extensions (autolink literals, strikethrough)
/// stay off so a bare URL in a cell is text, not a link.
pub fn parse_options() -> ParseOptions {
    ParseOptions {
        constructs: Constructs {
            gfm_table: true,
            ..Constructs::default()
        },
        ..ParseOptions::default()
    }
}

/// Two-step pipeline: markdown → year sections → records.
///
/// Best effort: a parser failure is logged and yields no records.
pub fn parse(markdown: &str) -> Vec<ConferenceRecord> {
    match try_parse(markdown) {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to parse conference markdown: {}", e);
            Vec::new()
        }
    }
}

/// Like [`parse`], but reports a markdown parser failure to the caller.
pub fn try_parse(markdown: &str) -> Result<Vec<ConferenceRecord>, ParseError> {
    if markdown.trim().is_empty() {
        warn!("Markdown content is empty, nothing to parse");
        return Ok(Vec::new());
    }

    let root = to_mdast(markdown, &parse_options())
        .map_err(|e| ParseError::Markdown(e.to_string()))?;
    let blocks = root.children().map(Vec::as_slice).unwrap_or_default();
    let defs = inline::collect_definitions(&root);

    let records: Vec<ConferenceRecord> = sections::locate_sections(blocks)
        .iter()
        .flat_map(|section| sections::section_records(section, &defs))
        .collect();

    info!("Parsed {} conferences from markdown", records.len());
    Ok(records)
}

// ── Tests ──
