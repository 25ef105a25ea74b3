use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const NOT_FOUND: &str = "N/A";
pub const FETCH_FAILED: &str = "ERROR";

static END_DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date shape pattern is valid")
});

/// Parses `YYYY-MM-DD` with a plain four digit, nonzero year.
///
/// chrono's `%Y` also takes signed or wider years; those stay unparsed.
pub fn parse_end_date(raw: &str) -> Option<NaiveDate> {
    if !END_DATE_SHAPE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() != 0)
}

/// Outcome of a warranty lookup for one serial.
///
/// Only the output boundary turns this back into the `N/A` / `ERROR` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarrantyTill {
    /// Latest end date found on the status page, with the text it was read from.
    Date { date: NaiveDate, raw: String },
    /// The page had end dates but none of them parsed; the last raw one is kept.
    Unrecognized(String),
    /// The page had no usable end date.
    NotFound,
    /// The vendor lookup itself failed.
    Error,
}

impl WarrantyTill {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            WarrantyTill::Date { date, .. } => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for WarrantyTill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarrantyTill::Date { raw, .. } | WarrantyTill::Unrecognized(raw) => f.write_str(raw),
            WarrantyTill::NotFound => f.write_str(NOT_FOUND),
            WarrantyTill::Error => f.write_str(FETCH_FAILED),
        }
    }
}

impl FromStr for WarrantyTill {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s {
            "" | NOT_FOUND => WarrantyTill::NotFound,
            FETCH_FAILED => WarrantyTill::Error,
            other => match parse_end_date(other) {
                Some(date) => WarrantyTill::Date {
                    date,
                    raw: other.to_string(),
                },
                None => WarrantyTill::Unrecognized(other.to_string()),
            },
        };
        Ok(value)
    }
}

impl Serialize for WarrantyTill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarrantyRecord {
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
    #[serde(rename = "WarrantyTill")]
    pub warranty_till: WarrantyTill,
}

impl WarrantyRecord {
    pub fn new(serial_number: impl Into<String>, warranty_till: WarrantyTill) -> Self {
        Self {
            serial_number: serial_number.into(),
            warranty_till,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Active,
    Expired,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverallCounts {
    pub active: usize,
    pub expired: usize,
}

impl OverallCounts {
    pub fn record(&mut self, coverage: Coverage) {
        match coverage {
            Coverage::Active => self.active += 1,
            Coverage::Expired => self.expired += 1,
        }
    }
}

/// Per-year tally; `total == active + expired` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearBucket {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Active")]
    pub active: usize,
    #[serde(rename = "Expired")]
    pub expired: usize,
}

impl YearBucket {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            total: 0,
            active: 0,
            expired: 0,
        }
    }

    pub fn record(&mut self, coverage: Coverage) {
        self.total += 1;
        match coverage {
            Coverage::Active => self.active += 1,
            Coverage::Expired => self.expired += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_round_trip_through_strings() {
        assert_eq!("N/A".parse::<WarrantyTill>().unwrap(), WarrantyTill::NotFound);
        assert_eq!("ERROR".parse::<WarrantyTill>().unwrap(), WarrantyTill::Error);
        assert_eq!(WarrantyTill::NotFound.to_string(), "N/A");
        assert_eq!(WarrantyTill::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_dates_and_unrecognized_values() {
        let till: WarrantyTill = "2027-03-31".parse().unwrap();
        assert_eq!(till.date(), NaiveDate::from_ymd_opt(2027, 3, 31));
        assert_eq!(till.to_string(), "2027-03-31");

        let raw: WarrantyTill = "31/03/2027".parse().unwrap();
        assert_eq!(raw, WarrantyTill::Unrecognized("31/03/2027".to_string()));
        assert_eq!(raw.date(), None);
        assert_eq!(raw.to_string(), "31/03/2027");
    }

    #[test]
    fn test_date_keeps_page_text() {
        let till: WarrantyTill = "2025-1-5".parse().unwrap();
        assert_eq!(till.date(), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(till.to_string(), "2025-1-5");
    }

    #[test]
    fn test_parse_end_date_requires_plain_nonzero_year() {
        assert_eq!(parse_end_date("2025-07-01"), NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(parse_end_date("+2025-07-01"), None);
        assert_eq!(parse_end_date("12025-07-01"), None);
        assert_eq!(parse_end_date("0000-01-01"), None);
        assert_eq!(parse_end_date("2025-13-01"), None);
        assert_eq!("0000-01-01".parse::<WarrantyTill>().unwrap().date(), None);
    }

    #[test]
    fn test_year_bucket_keeps_total_consistent() {
        let mut bucket = YearBucket::new(2026);
        bucket.record(Coverage::Active);
        bucket.record(Coverage::Expired);
        bucket.record(Coverage::Active);
        assert_eq!(bucket.total, 3);
        assert_eq!(bucket.total, bucket.active + bucket.expired);
    }
}
