use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigate,
    Search,
    DateFilter,
}

/// How many tags the card header shows before cutting off.
pub const CARD_TAG_LIMIT: usize = 4;

/// One journal card. The collection is read-only for the whole session;
/// the deck changes only when the deck directory changes between runs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entry {
    pub id: String,
    /// Calendar date as "YYYY-MM-DD". Compared and sorted as a plain
    /// string; the fixed format makes lexicographic order chronological.
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Card body. Opaque to the deck logic; only the UI renders it.
    #[serde(default)]
    pub body: String,
}

/// Display-only formatting: "2026-01-16" -> "Jan 16, 2026".
/// Anything that doesn't parse is shown as-is.
pub fn pretty_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn is_valid_entry_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_date_formats_iso_dates() {
        assert_eq!(pretty_date("2026-01-16"), "Jan 16, 2026");
        assert_eq!(pretty_date("2025-12-03"), "Dec 3, 2025");
    }

    #[test]
    fn pretty_date_passes_garbage_through() {
        assert_eq!(pretty_date("not-a-date"), "not-a-date");
        assert_eq!(pretty_date(""), "");
    }

    #[test]
    fn validates_entry_dates() {
        assert!(is_valid_entry_date("2026-01-20"));
        assert!(!is_valid_entry_date("2026-13-01"));
        assert!(!is_valid_entry_date("01/20/2026"));
    }
}
