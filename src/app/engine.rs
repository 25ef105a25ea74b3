use crate::app::report;
use crate::app::serials::decode_serial_list;
use crate::config::settings::ReportOptions;
use crate::core::aggregator::{overall_counts, summarize_by_year};
use crate::core::checker::WarrantyChecker;
use crate::domain::model::{OverallCounts, WarrantyRecord, YearBucket};
use crate::domain::ports::{Storage, WarrantySource};
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub records: Vec<WarrantyRecord>,
    pub overall: OverallCounts,
    pub by_year: Option<Vec<YearBucket>>,
}

/// Drives single and bulk lookups and writes their console and file output.
pub struct LookupEngine<S: Storage, F: WarrantySource> {
    storage: S,
    checker: WarrantyChecker<F>,
}

impl<S: Storage, F: WarrantySource> LookupEngine<S, F> {
    pub fn new(storage: S, source: F) -> Self {
        Self {
            storage,
            checker: WarrantyChecker::new(source),
        }
    }

    pub async fn run_single<W: Write>(&self, serial: &str, out: &mut W) -> Result<WarrantyRecord> {
        let record = self.checker.lookup(serial).await;
        report::write_single_record(&mut *out, &record)?;
        Ok(record)
    }

    /// Input and output file errors abort the run; lookup failures never do.
    pub async fn run_bulk<W: Write>(
        &self,
        input: &str,
        options: &ReportOptions,
        now: NaiveDateTime,
        out: &mut W,
    ) -> Result<BulkReport> {
        tracing::info!("Reading serial list from {}", input);
        let data = self.storage.read_file(input).await?;
        let serials = decode_serial_list(input, data)?;
        tracing::info!("Looking up {} serial(s)", serials.len());

        let records = self.checker.lookup_all(&serials).await;
        let overall = overall_counts(&records, now);

        writeln!(out, "\n{}", report::render_records_table(&records))?;
        writeln!(out, "\n{}", report::render_overall(&overall))?;

        if let Some(path) = &options.output {
            self.storage
                .write_file(path, &report::records_csv(&records)?)
                .await?;
            writeln!(out, "Saved detailed results CSV → {}", path)?;
        }

        let by_year = if options.summary_by_year {
            let buckets = summarize_by_year(&records, now);
            writeln!(out, "\n{}", report::render_year_summary(&buckets))?;

            if let Some(path) = &options.summary_output {
                self.storage
                    .write_file(path, &report::year_summary_csv(&buckets)?)
                    .await?;
                writeln!(out, "\nSaved summary CSV → {}", path)?;
            }
            Some(buckets)
        } else {
            if options.summary_output.is_some() {
                tracing::warn!("--summary-output has no effect without --summary-by-year");
            }
            None
        };

        Ok(BulkReport {
            records,
            overall,
            by_year,
        })
    }
}
