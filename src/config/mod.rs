#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use settings::{LookupMode, LookupSettings, ReportOptions};
pub use toml_config::WarrantyFileConfig;
