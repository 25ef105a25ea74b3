use crate::domain::model::{Coverage, OverallCounts, WarrantyRecord, YearBucket};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Coverage runs until the start of its end date.
pub fn classify(end_date: NaiveDate, now: NaiveDateTime) -> Coverage {
    if end_date.and_time(chrono::NaiveTime::MIN) >= now {
        Coverage::Active
    } else {
        Coverage::Expired
    }
}

/// Counts active and expired warranties; records without a parseable date are skipped.
pub fn overall_counts(records: &[WarrantyRecord], now: NaiveDateTime) -> OverallCounts {
    records
        .iter()
        .filter_map(|r| r.warranty_till.date())
        .fold(OverallCounts::default(), |mut counts, end| {
            counts.record(classify(end, now));
            counts
        })
}

/// Groups dated records by end-date year, ascending.
pub fn summarize_by_year(records: &[WarrantyRecord], now: NaiveDateTime) -> Vec<YearBucket> {
    let mut buckets: BTreeMap<i32, YearBucket> = BTreeMap::new();

    for end in records.iter().filter_map(|r| r.warranty_till.date()) {
        buckets
            .entry(end.year())
            .or_insert_with(|| YearBucket::new(end.year()))
            .record(classify(end, now));
    }

    buckets.into_values().collect()
}
