use crate::domain::model::{OverallCounts, WarrantyRecord, YearBucket};
use crate::utils::error::Result;
use std::io::Write;

pub const RECORD_HEADER: [&str; 2] = ["SerialNumber", "WarrantyTill"];
pub const SUMMARY_HEADER: [&str; 4] = ["Year", "Total", "Active", "Expired"];

pub fn render_records_table(records: &[WarrantyRecord]) -> String {
    let mut lines = vec![
        format!("{:<15} {:<15}", RECORD_HEADER[0], RECORD_HEADER[1]),
        "-".repeat(32),
    ];
    for record in records {
        lines.push(format!(
            "{:<15} {:<15}",
            record.serial_number,
            record.warranty_till.to_string()
        ));
    }
    lines.join("\n")
}

pub fn render_overall(counts: &OverallCounts) -> String {
    format!(
        "{}\nWarranty active: {}\nWarranty ended: {}",
        "=".repeat(32),
        counts.active,
        counts.expired
    )
}

pub fn render_year_summary(buckets: &[YearBucket]) -> String {
    let mut lines = vec![
        "Summary by Year".to_string(),
        "-".repeat(48),
        format!(
            "{:<6} {:<8} {:<8} {:<8}",
            SUMMARY_HEADER[0], SUMMARY_HEADER[1], SUMMARY_HEADER[2], SUMMARY_HEADER[3]
        ),
    ];
    for b in buckets {
        lines.push(format!(
            "{:<6} {:<8} {:<8} {:<8}",
            b.year, b.total, b.active, b.expired
        ));
    }
    lines.join("\n")
}

// 表頭一律輸出，即使沒有任何資料列
fn write_csv<W, T>(writer: W, header: &[&str], rows: &[T]) -> Result<W>
where
    W: Write,
    T: serde::Serialize,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(csv_writer.into_inner().map_err(|e| e.into_error())?)
}

pub fn records_csv(records: &[WarrantyRecord]) -> Result<Vec<u8>> {
    write_csv(Vec::new(), &RECORD_HEADER, records)
}

pub fn year_summary_csv(buckets: &[YearBucket]) -> Result<Vec<u8>> {
    write_csv(Vec::new(), &SUMMARY_HEADER, buckets)
}

/// Single-lookup output: header plus one row.
pub fn write_single_record<W: Write>(out: W, record: &WarrantyRecord) -> Result<()> {
    write_csv(out, &RECORD_HEADER, std::slice::from_ref(record))?;
    Ok(())
}
