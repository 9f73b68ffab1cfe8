use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::Serialize;

static SINCE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\bsince:\s*(\S*)$").ok());

const RANGES: [(&str, i64); 4] = [
    ("Yesterday", 1),
    ("Last Week", 7),
    ("Last 2 Weeks", 14),
    ("Last Month", 30),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSuggestion {
    pub label: String,
    /// `YYYY-MM-DD`, the format the search box expects after `since:`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSuggestions {
    /// The partial date typed after `since:`.
    pub matched_pretext: String,
    pub items: Vec<DateSuggestion>,
}

/// Date shortcuts for a search box whose text ends in `since:<partial>`.
pub fn search_date_suggestions(pretext: &str, today: NaiveDate) -> Option<DateSuggestions> {
    let lowered = pretext.to_lowercase();
    let caps = SINCE.as_ref()?.captures(&lowered)?;
    let matched_pretext = caps.get(1).map(|m| m.as_str()).unwrap_or_default().to_string();

    let items = RANGES
        .iter()
        .map(|(label, days)| DateSuggestion {
            label: (*label).to_string(),
            date: (today - Duration::days(*days)).format("%Y-%m-%d").to_string(),
        })
        .collect();

    Some(DateSuggestions {
        matched_pretext,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn offers_four_ranges() {
        let s = search_date_suggestions("rates since:", day(2024, 3, 1)).unwrap();
        assert_eq!(s.matched_pretext, "");
        let dates: Vec<(&str, &str)> = s
            .items
            .iter()
            .map(|i| (i.label.as_str(), i.date.as_str()))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("Yesterday", "2024-02-29"),
                ("Last Week", "2024-02-23"),
                ("Last 2 Weeks", "2024-02-16"),
                ("Last Month", "2024-01-31"),
            ]
        );
    }

    #[test]
    fn captures_partial_and_ignores_case() {
        let s = search_date_suggestions("SINCE: 2024-0", day(2024, 3, 1)).unwrap();
        assert_eq!(s.matched_pretext, "2024-0");
    }

    #[test]
    fn requires_trailing_since_term() {
        assert!(search_date_suggestions("since:2024-01-01 rates", day(2024, 3, 1)).is_none());
        assert!(search_date_suggestions("nonsince:", day(2024, 3, 1)).is_none());
        assert!(search_date_suggestions("rates", day(2024, 3, 1)).is_none());
    }
}
