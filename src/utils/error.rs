use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarrantyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Vendor endpoint returned HTTP {status} for serial {serial}")]
    HttpStatusError { serial: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input file {path}: {message}")]
    InputError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Config,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
}

impl WarrantyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WarrantyError::HttpError(_) | WarrantyError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            WarrantyError::IoError(_) => ErrorCategory::Io,
            WarrantyError::CsvError(_) | WarrantyError::InputError { .. } => ErrorCategory::Data,
            WarrantyError::ConfigValidationError { .. }
            | WarrantyError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單筆查詢失敗可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Config | ErrorCategory::Io => ErrorSeverity::High,
        }
    }

    /// Process exit status: a failed vendor call is 2, anything else 1.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WarrantyError::HttpError(e) if e.is_timeout() => {
                "The warranty service did not answer in time".to_string()
            }
            WarrantyError::HttpError(_) => "Could not reach the warranty service".to_string(),
            WarrantyError::HttpStatusError { serial, status } => {
                format!("Warranty service rejected serial {} (HTTP {})", serial, status)
            }
            WarrantyError::CsvError(e) => format!("Could not write CSV output: {}", e),
            WarrantyError::IoError(e) => format!("File operation failed: {}", e),
            WarrantyError::InputError { path, message } => {
                format!("Could not read serial list '{}': {}", path, message)
            }
            WarrantyError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            WarrantyError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid value '{}' for {}: {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again later",
            ErrorCategory::Io => "Check that the file exists and that you have permission to access it",
            ErrorCategory::Data => "Make sure the serial list is a UTF-8 text file with one serial per line",
            ErrorCategory::Config => "Review the command line flags and the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, WarrantyError>;
