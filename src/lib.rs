pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::LenovoClient, storage::LocalStorage};
pub use app::engine::{BulkReport, LookupEngine};
pub use config::{LookupMode, LookupSettings, ReportOptions, WarrantyFileConfig};
pub use core::checker::WarrantyChecker;
pub use domain::model::{OverallCounts, WarrantyRecord, WarrantyTill, YearBucket};
pub use utils::error::{Result, WarrantyError};
