pub mod aggregator;
pub mod checker;
pub mod extractor;

pub use crate::domain::model::{OverallCounts, WarrantyRecord, WarrantyTill, YearBucket};
pub use crate::domain::ports::{ConfigProvider, Storage, WarrantySource};
pub use crate::utils::error::Result;
