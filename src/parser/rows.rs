use markdown::mdast::Node;
use tracing::{debug, warn};

use super::fields::{extract_country, parse_hybrid};
use super::inline::{extract_text, first_link, Definitions};
use crate::model::ConferenceRecord;

const NAME: usize = 0;
const LOCATION: usize = 1;
const HYBRID: usize = 2;
// Column 3 is reserved: counted toward the width, never read.
const CFP: usize = 4;
pub const MIN_COLUMNS: usize = 5;

/// Map one body row of a year table to a record. `None` means the row was skipped.
pub fn map_row(row: &Node, year: &str, defs: &Definitions) -> Option<ConferenceRecord> {
    let cells: Vec<&Node> = row
        .children()
        .map(|c| c.iter().filter(|n| matches!(n, Node::TableCell(_))).collect())
        .unwrap_or_default();
    let texts: Vec<String> = cells
        .iter()
        .map(|c| extract_text(Some(*c)).trim().to_string())
        .collect();

    if texts.len() < MIN_COLUMNS {
        warn!(
            "Skipping row in {}: expected >= {} cells, found {} {:?}",
            year,
            MIN_COLUMNS,
            texts.len(),
            texts
        );
        return None;
    }

    let Ok(year_num) = year.parse::<i32>() else {
        warn!("Skipping row: section year '{}' is not an integer", year);
        return None;
    };

    let text = |i: usize| texts.get(i).cloned().unwrap_or_default();
    let name = text(NAME);
    let location = text(LOCATION);
    let cfp_text = text(CFP);

    let record = ConferenceRecord {
        year: year_num,
        link: first_link(cells.get(NAME).copied(), defs),
        country: extract_country(&location),
        is_hybrid: parse_hybrid(texts.get(HYBRID).map(String::as_str)),
        cfp_status: (cfp_text != "-").then_some(cfp_text),
        cfp_link: first_link(cells.get(CFP).copied(), defs),
        name,
        location,
    };

    debug!("Mapped conference '{}' for {}", record.name, year);
    Some(record)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::inline::collect_definitions;
    use crate::parser::parse_options;
    use markdown::to_mdast;

    fn no_defs() -> Definitions {
        Definitions::new()
    }

    /// First body row of the first table in `md`.
    fn body_row(md: &str) -> Node {
        let root = to_mdast(md, &parse_options()).unwrap();
        let table = root
            .children()
            .unwrap()
            .iter()
            .find(|n| matches!(n, Node::Table(_)))
            .expect("table")
            .clone();
        table.children().unwrap()[1].clone()
    }

    #[test]
    fn five_cells_with_dash_cfp() {
        let row = body_row(
            "| Name | Location | Hybrid | Reserved | CFP |\n\
             |---|---|---|---|---|\n\
             | DevConf | Kraków, Poland | No | x | - |\n",
        );
        let r = map_row(&row, "2025", &no_defs()).unwrap();
        assert_eq!(r.year, 2025);
        assert_eq!(r.name, "DevConf");
        assert_eq!(r.location, "Kraków, Poland");
        assert_eq!(r.country.as_deref(), Some("Poland"));
        assert!(!r.is_hybrid);
        assert_eq!(r.cfp_status, None);
        assert_eq!(r.cfp_link, None);
        assert_eq!(r.link, None);
    }

    #[test]
    fn links_and_hybrid() {
        let row = body_row(
            "| Name | Location | Hybrid | Reserved | CFP |\n\
             |---|---|---|---|---|\n\
             | [**Devoxx**](https://devoxx.be) | Antwerp, Belgium | Hybrid | Oct 6-10 | [Open](https://cfp.devoxx.be) |\n",
        );
        let r = map_row(&row, "2025", &no_defs()).unwrap();
        assert_eq!(r.name, "Devoxx");
        assert_eq!(r.link.as_deref(), Some("https://devoxx.be"));
        assert!(r.is_hybrid);
        assert_eq!(r.cfp_status.as_deref(), Some("Open"));
        assert_eq!(r.cfp_link.as_deref(), Some("https://cfp.devoxx.be"));
        assert_eq!(r.country.as_deref(), Some("Belgium"));
    }

    #[test]
    fn remote_location_has_no_country() {
        let row = body_row(
            "| Name | Location | Hybrid | Reserved | CFP |\n\
             |---|---|---|---|---|\n\
             | Online Java Day | Remote | yes | | Closed |\n",
        );
        let r = map_row(&row, "2024", &no_defs()).unwrap();
        assert_eq!(r.country, None);
        assert_eq!(r.cfp_status.as_deref(), Some("Closed"));
    }

    #[test]
    fn three_cells_skipped() {
        let row = body_row(
            "| Name | Location | Hybrid |\n\
             |---|---|---|\n\
             | DevConf | Kraków, Poland | No |\n",
        );
        assert_eq!(map_row(&row, "2025", &no_defs()), None);
    }

    #[test]
    fn bad_year_skipped() {
        let row = body_row(
            "| Name | Location | Hybrid | Reserved | CFP |\n\
             |---|---|---|---|---|\n\
             | DevConf | Kraków, Poland | No | x | - |\n",
        );
        assert_eq!(map_row(&row, "20x5", &no_defs()), None);
    }

    #[test]
    fn non_row_node_skipped() {
        let root = to_mdast("just text", &parse_options()).unwrap();
        assert_eq!(map_row(&root.children().unwrap()[0], "2025", &no_defs()), None);
    }

    #[test]
    fn reference_links_in_name_and_cfp() {
        let md = "| Name | Location | Hybrid | Reserved | CFP |\n\
                  |---|---|---|---|---|\n\
                  | [**Devoxx**][dx] | Antwerp, Belgium | Yes | x | [Open][Devoxx CFP] |\n\
                  \n\
                  [dx]: https://devoxx.be\n\
                  [devoxx   cfp]: https://devoxx.be/cfp\n";
        let root = to_mdast(md, &parse_options()).unwrap();
        let defs = collect_definitions(&root);
        let r = map_row(&body_row(md), "2025", &defs).unwrap();
        assert_eq!(r.name, "Devoxx");
        assert_eq!(r.link.as_deref(), Some("https://devoxx.be"));
        assert_eq!(r.cfp_status.as_deref(), Some("Open"));
        assert_eq!(r.cfp_link.as_deref(), Some("https://devoxx.be/cfp"));
    }
}
