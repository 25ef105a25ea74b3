use crate::config::settings::{LookupMode, LookupSettings, ReportOptions};
use crate::config::toml_config::WarrantyFileConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "lenovo-warranty")]
#[command(about = "Get Lenovo warranty information by serial number")]
#[command(disable_help_flag = true)]
pub struct CliConfig {
    /// Device serial number
    pub serial: Option<String>,

    /// Input file containing serial numbers (one per line)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Output CSV file (only used with -f option)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print a summary table grouped by end date year (bulk mode only)
    #[arg(long)]
    pub summary_by_year: bool,

    /// Optional CSV path to export the yearly summary table
    #[arg(long)]
    pub summary_output: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Warranty status URL template containing {serial}
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Show this help message and exit
    #[arg(short, long)]
    pub help: bool,
}

impl CliConfig {
    /// Help needs no config file, so it is decided from the flags alone.
    pub fn wants_help(&self) -> bool {
        self.help || (self.file.is_none() && self.serial.is_none())
    }

    /// Input file wins over a positional serial; neither means help.
    pub fn mode(&self, file_config: Option<&WarrantyFileConfig>) -> LookupMode {
        if self.wants_help() {
            return LookupMode::Help;
        }

        match (&self.file, &self.serial) {
            (Some(input), _) => LookupMode::Bulk {
                input: input.clone(),
                report: ReportOptions {
                    output: self
                        .output
                        .clone()
                        .or_else(|| file_config.and_then(|c| c.output()).map(str::to_string)),
                    summary_by_year: self.summary_by_year
                        || file_config.map(|c| c.summary_by_year()).unwrap_or(false),
                    summary_output: self.summary_output.clone().or_else(|| {
                        file_config
                            .and_then(|c| c.summary_output())
                            .map(str::to_string)
                    }),
                },
            },
            (None, Some(serial)) => {
                if self.output.is_some() {
                    tracing::warn!("--output is only used together with --file, ignoring it");
                }
                LookupMode::Single(serial.clone())
            }
            (None, None) => LookupMode::Help,
        }
    }

    pub fn settings(&self, file_config: Option<&WarrantyFileConfig>) -> LookupSettings {
        let defaults = LookupSettings::default();

        let endpoint_template = self
            .endpoint
            .clone()
            .or_else(|| file_config.and_then(|c| c.endpoint()).map(str::to_string))
            .unwrap_or(defaults.endpoint_template);

        let timeout = self
            .timeout
            .or_else(|| file_config.and_then(|c| c.timeout_seconds()))
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        LookupSettings {
            endpoint_template,
            timeout,
        }
    }
}

pub fn help_text() -> String {
    let rule = "=".repeat(70);
    format!(
        "{rule}
  Lenovo Warranty Checker
{rule}

Get Lenovo warranty information via web scrape using serial number

Usage:
  Single: lenovo-warranty <serial_number>
  Bulk:   lenovo-warranty -f devices.txt [-o output.csv]
  Bulk + summary by year:
          lenovo-warranty -f devices.txt --summary-by-year
          [--summary-output summary.csv]

Options:
  serial                  Device serial number
  -f, --file FILE         Input file containing serial numbers (one per line)
  -o, --output OUTPUT     Output CSV file (only used with -f option)
  --summary-by-year       Print a summary table grouped by EndDate year
  --summary-output FILE   Optional CSV path to export the yearly summary
  -c, --config FILE       TOML configuration file
  --endpoint TEMPLATE     Warranty status URL template containing {{serial}}
  --timeout SECONDS       Per-request timeout (default 30)
  -v, --verbose           Enable verbose logging
  --log-json              Emit logs as JSON
  -h, --help              Show this help message and exit"
    )
}
