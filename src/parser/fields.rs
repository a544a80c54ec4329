use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

// e.g. "January 10-12" or "Feb 5"
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s+(\d{1,2})(?:-\d{1,2})?").unwrap());

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// "yes" or "hybrid" (any case) mark a hybrid event. Everything else is on-site only.
pub fn parse_hybrid(text: Option<&str>) -> bool {
    match text {
        Some(t) => {
            let t = t.trim().to_lowercase();
            t == "yes" || t == "hybrid"
        }
        None => false,
    }
}

/// Country from a "City, Country" location: whatever follows the last comma.
pub fn extract_country(location: &str) -> Option<String> {
    let (_, tail) = location.rsplit_once(',')?;
    let country = tail.trim();
    if country.is_empty() {
        None
    } else {
        Some(country.to_string())
    }
}

/// Normalize a loose date cell to `YYYY-MM-DD` using the start day of any range.
/// Unrecognized input comes back unchanged; "TBD" in any case comes back as "TBD".
pub fn normalize_date(text: &str, year: i32) -> String {
    let trimmed = text.trim();
    let Some(caps) = DATE_RE.captures(trimmed) else {
        if trimmed.eq_ignore_ascii_case("tbd") {
            return "TBD".to_string();
        }
        debug!("Date '{}' did not match expected pattern for {}", text, year);
        return text.to_string();
    };

    let date = month_number(&caps[1]).and_then(|month| {
        let day = caps[2].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });

    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => {
            debug!("Could not build a date from '{}' for {}", text, year);
            text.to_string()
        }
    }
}

/// 1-based month for a full English name, its 3-letter abbreviation, or "sept".
fn month_number(word: &str) -> Option<u32> {
    let word = word.to_lowercase();
    if word == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| *m == word || (word.len() == 3 && m.starts_with(word.as_str())))
        .map(|i| i as u32 + 1)
}

// ── Tests ──
