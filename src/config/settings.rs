use crate::adapters::http::{DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_TIMEOUT_SECS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_endpoint_template, validate_non_empty_string, validate_path,
    validate_positive_number, Validate,
};
use std::time::Duration;

/// Resolved vendor endpoint settings (CLI > TOML > defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub endpoint_template: String,
    pub timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ConfigProvider for LookupSettings {
    fn endpoint_template(&self) -> &str {
        &self.endpoint_template
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

impl Validate for LookupSettings {
    fn validate(&self) -> Result<()> {
        validate_endpoint_template("source.endpoint", &self.endpoint_template)?;
        validate_positive_number("source.timeout_seconds", self.timeout.as_millis() as u64, 1)?;
        Ok(())
    }
}

/// What to do with bulk results besides printing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub output: Option<String>,
    pub summary_by_year: bool,
    pub summary_output: Option<String>,
}

impl Validate for ReportOptions {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.output {
            validate_path("report.output", path)?;
        }
        if let Some(path) = &self.summary_output {
            validate_path("report.summary_output", path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupMode {
    Help,
    Single(String),
    Bulk { input: String, report: ReportOptions },
}

impl Validate for LookupMode {
    fn validate(&self) -> Result<()> {
        match self {
            LookupMode::Help => Ok(()),
            LookupMode::Single(serial) => validate_non_empty_string("serial", serial),
            LookupMode::Bulk { input, report } => {
                validate_path("file", input)?;
                report.validate()
            }
        }
    }
}
