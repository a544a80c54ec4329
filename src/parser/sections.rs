use std::sync::LazyLock;

use markdown::mdast::Node;
use regex::Regex;
use tracing::{debug, info, warn};

use super::inline::{extract_text, Definitions};
use super::rows::map_row;
use crate::model::ConferenceRecord;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// A `### YYYY` heading and the table that immediately follows it.
#[derive(Debug)]
pub struct YearSection<'a> {
    pub year: String,
    pub table: &'a Node,
}

/// Find every year section among the top-level blocks, in document order.
pub fn locate_sections(blocks: &[Node]) -> Vec<YearSection<'_>> {
    let mut sections = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        let Node::Heading(heading) = block else {
            continue;
        };
        if heading.depth != 3 {
            continue;
        }

        let text = extract_text(Some(block)).trim().to_string();
        if !YEAR_RE.is_match(&text) {
            debug!("Skipping H3 heading '{}': not a year", text);
            continue;
        }

        match blocks.get(i + 1) {
            Some(table @ Node::Table(_)) => sections.push(YearSection { year: text, table }),
            _ => warn!("No table immediately after heading for {}", text),
        }
    }

    sections
}

/// Map the body rows of a year section. The first table row is the header.
pub fn section_records(section: &YearSection<'_>, defs: &Definitions) -> Vec<ConferenceRecord> {
    let rows: Vec<&Node> = section
        .table
        .children()
        .map(|c| {
            c.iter()
                .filter(|n| matches!(n, Node::TableRow(_)))
                .skip(1)
                .collect()
        })
        .unwrap_or_default();

    if rows.is_empty() {
        warn!("Table for {} has no body rows", section.year);
        return Vec::new();
    }

    info!("Processing {} rows for {}", rows.len(), section.year);
    rows.into_iter()
        .filter_map(|row| map_row(row, &section.year, defs))
        .collect()
}

// ── Tests ──
