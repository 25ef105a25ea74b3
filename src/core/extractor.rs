//! Pulls warranty end dates out of the vendor status page and picks the latest one.
//!
//! A device can carry several warranty line items (base warranty plus
//! extensions); its coverage lasts as long as the latest-expiring one.

use crate::domain::model::{parse_end_date, WarrantyTill, NOT_FOUND};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static END_DATE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)End Date:&nbsp;</b>([^<]+)").expect("end date pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    raw: String,
    // None 代表無法解析，排序時視為最早的日期
    parsed: Option<NaiveDate>,
}

/// Returns every end-date field on the page, trimmed, in document order.
pub fn extract_end_dates(response_text: &str) -> Vec<String> {
    END_DATE_LABEL
        .captures_iter(response_text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Picks the latest warranty end date from raw field values.
///
/// Empty values and `N/A` are dropped. Values that do not parse as
/// `YYYY-MM-DD` stay in the running but sort before every real date, so one
/// only wins when nothing parseable is left.
pub fn select_latest<I, S>(values: I) -> WarrantyTill
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates: Vec<Candidate> = values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_FOUND)
        .map(|raw| Candidate {
            parsed: parse_end_date(&raw),
            raw,
        })
        .collect();

    // stable sort: unparsable values keep their relative order
    candidates.sort_by_key(|c| c.parsed);

    match candidates.pop() {
        Some(Candidate {
            raw,
            parsed: Some(date),
        }) => WarrantyTill::Date { date, raw },
        Some(Candidate { raw, parsed: None }) => WarrantyTill::Unrecognized(raw),
        None => WarrantyTill::NotFound,
    }
}

pub fn select_latest_warranty_date(response_text: &str) -> WarrantyTill {
    let end_dates = extract_end_dates(response_text);
    tracing::debug!("Found {} end date field(s)", end_dates.len());
    select_latest(end_dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(end_dates: &[&str]) -> String {
        let rows: Vec<String> = end_dates
            .iter()
            .map(|d| {
                format!(
                    "<tr><td><b>Start Date:&nbsp;</b>2021-01-01</td><td><b>End Date:&nbsp;</b>{}</td></tr>",
                    d
                )
            })
            .collect();
        format!("<html><body><table>{}</table></body></html>", rows.join("\n"))
    }

    fn date(y: i32, m: u32, d: u32) -> WarrantyTill {
        WarrantyTill::Date {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            raw: format!("{:04}-{:02}-{:02}", y, m, d),
        }
    }

    #[test]
    fn test_no_label_returns_not_found() {
        assert_eq!(select_latest_warranty_date(""), WarrantyTill::NotFound);
        assert_eq!(
            select_latest_warranty_date("<html><b>Serial not found</b></html>"),
            WarrantyTill::NotFound
        );
    }

    #[test]
    fn test_latest_of_several_valid_dates() {
        let html = page(&["2024-06-30", "2027-03-31", "2025-12-01"]);
        assert_eq!(select_latest_warranty_date(&html), date(2027, 3, 31));
    }

    #[test]
    fn test_not_available_entries_are_discarded() {
        let html = page(&["2026-01-01", "N/A", "2025-05-05"]);
        assert_eq!(select_latest_warranty_date(&html), date(2026, 1, 1));
    }

    #[test]
    fn test_only_not_available_returns_not_found() {
        let html = page(&["N/A", "  "]);
        assert_eq!(select_latest_warranty_date(&html), WarrantyTill::NotFound);
    }

    #[test]
    fn test_single_unparsable_value_is_returned() {
        let html = page(&["unknown"]);
        assert_eq!(
            select_latest_warranty_date(&html),
            WarrantyTill::Unrecognized("unknown".to_string())
        );
    }

    #[test]
    fn test_unparsable_values_never_beat_real_dates() {
        assert_eq!(select_latest(["2020-02-02", "soon"]), date(2020, 2, 2));
        assert_eq!(select_latest(["soon", "2020-02-02"]), date(2020, 2, 2));
    }

    #[test]
    fn test_last_unparsable_value_wins_among_unparsable() {
        assert_eq!(
            select_latest(["pending", "unknown"]),
            WarrantyTill::Unrecognized("unknown".to_string())
        );
    }

    #[test]
    fn test_selected_date_keeps_page_text() {
        let selected = select_latest(["2024-12-31", "2025-1-5"]);
        assert_eq!(selected.date(), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(selected.to_string(), "2025-1-5");
    }

    #[test]
    fn test_signed_or_zero_years_are_unparsable() {
        assert_eq!(select_latest(["2025-06-30", "+2025-07-01"]), date(2025, 6, 30));
        assert_eq!(select_latest(["+2025-07-01", "2025-06-30"]), date(2025, 6, 30));
        assert_eq!(
            select_latest(["0000-01-01"]),
            WarrantyTill::Unrecognized("0000-01-01".to_string())
        );
    }

    #[test]
    fn test_label_match_is_case_insensitive_and_trimmed() {
        let html = "<b>END DATE:&nbsp;</b>  2028-08-15 \n</td><b>end date:&nbsp;</b>2026-01-01</td>";
        assert_eq!(extract_end_dates(html), vec!["2028-08-15", "2026-01-01"]);
        assert_eq!(select_latest_warranty_date(html), date(2028, 8, 15));
    }

    #[test]
    fn test_selection_is_idempotent() {
        let html = page(&["2026-01-01", "garbage", "2029-09-09"]);
        let first = select_latest_warranty_date(&html);
        let second = select_latest_warranty_date(&html);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "2029-09-09");
    }
}
