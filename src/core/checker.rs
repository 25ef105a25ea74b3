use crate::core::extractor::select_latest_warranty_date;
use crate::domain::model::{WarrantyRecord, WarrantyTill};
use crate::domain::ports::WarrantySource;

/// Turns serial numbers into warranty records, one lookup at a time.
pub struct WarrantyChecker<F: WarrantySource> {
    source: F,
}

impl<F: WarrantySource> WarrantyChecker<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    /// Looks up one serial. A failed fetch becomes an `ERROR` record instead of an error.
    pub async fn lookup(&self, serial: &str) -> WarrantyRecord {
        match self.source.fetch(serial).await {
            Ok(body) => {
                let till = select_latest_warranty_date(&body);
                tracing::debug!("Serial {} warranty till {}", serial, till);
                WarrantyRecord::new(serial, till)
            }
            Err(e) => {
                tracing::debug!("Lookup failed for {}: {:?}", serial, e);
                eprintln!("Error fetching warranty for {}: {}", serial, e);
                WarrantyRecord::new(serial, WarrantyTill::Error)
            }
        }
    }

    /// Looks up every serial in order; each request finishes before the next starts.
    pub async fn lookup_all<I, S>(&self, serials: I) -> Vec<WarrantyRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for serial in serials {
            records.push(self.lookup(serial.as_ref()).await);
        }
        tracing::info!("Completed {} lookup(s)", records.len());
        records
    }
}
