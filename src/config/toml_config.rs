use crate::utils::error::{Result, WarrantyError};
use crate::utils::validation::{
    validate_endpoint_template, validate_path, validate_positive_number, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Optional TOML config file. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarrantyFileConfig {
    pub source: Option<SourceConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output: Option<String>,
    pub summary_by_year: Option<bool>,
    pub summary_output: Option<String>,
}

impl WarrantyFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WarrantyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WarrantyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LENOVO_WARRANTY_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.endpoint.as_deref())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.source.as_ref().and_then(|s| s.timeout_seconds)
    }

    pub fn output(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output.as_deref())
    }

    pub fn summary_by_year(&self) -> bool {
        self.report
            .as_ref()
            .and_then(|r| r.summary_by_year)
            .unwrap_or(false)
    }

    pub fn summary_output(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.summary_output.as_deref())
    }
}

impl Validate for WarrantyFileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = self.endpoint() {
            validate_endpoint_template("source.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds() {
            validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = self.output() {
            validate_path("report.output", path)?;
        }
        if let Some(path) = self.summary_output() {
            validate_path("report.summary_output", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "https://warranty.example.com/status?serial={serial}"
timeout_seconds = 10

[report]
output = "results.csv"
summary_by_year = true
summary_output = "summary.csv"
"#;

        let config = WarrantyFileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.endpoint(),
            Some("https://warranty.example.com/status?serial={serial}")
        );
        assert_eq!(config.timeout_seconds(), Some(10));
        assert_eq!(config.output(), Some("results.csv"));
        assert!(config.summary_by_year());
        assert_eq!(config.summary_output(), Some("summary.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = WarrantyFileConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint(), None);
        assert_eq!(config.timeout_seconds(), None);
        assert!(!config.summary_by_year());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LENOVO_WARRANTY_TEST_HOST", "mirror.example.com");

        let toml_content = r#"
[source]
endpoint = "https://${LENOVO_WARRANTY_TEST_HOST}/status?serial={serial}"
"#;

        let config = WarrantyFileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.endpoint(),
            Some("https://mirror.example.com/status?serial={serial}")
        );

        std::env::remove_var("LENOVO_WARRANTY_TEST_HOST");
    }

    #[test]
    fn test_config_validation() {
        let config = WarrantyFileConfig::from_toml_str(
            r#"
[source]
endpoint = "https://warranty.example.com/status"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = WarrantyFileConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = WarrantyFileConfig::from_toml_str("[source\nendpoint = 1").unwrap_err();
        assert!(matches!(err, WarrantyError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[report]\nsummary_by_year = true\n")
            .unwrap();

        let config = WarrantyFileConfig::from_file(temp_file.path()).unwrap();
        assert!(config.summary_by_year());
    }
}
