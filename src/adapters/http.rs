use crate::domain::ports::{ConfigProvider, WarrantySource};
use crate::utils::error::{Result, WarrantyError};
use crate::utils::validation::SERIAL_PLACEHOLDER;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "https://csp.lenovo.com/ibapp/il/WarrantyStatus.jsp?serial={serial}";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Lenovo warranty status page client. One GET per serial, no retries.
pub struct LenovoClient {
    client: Client,
    endpoint_template: String,
}

impl LenovoClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            endpoint_template: config.endpoint_template().to_string(),
        })
    }

    /// The serial goes into the template as-is.
    pub fn request_url(&self, serial: &str) -> String {
        self.endpoint_template.replace(SERIAL_PLACEHOLDER, serial)
    }
}

#[async_trait]
impl WarrantySource for LenovoClient {
    async fn fetch(&self, serial: &str) -> Result<String> {
        let url = self.request_url(serial);
        tracing::debug!("Making warranty request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Warranty response status: {}", response.status());

        if !response.status().is_success() {
            return Err(WarrantyError::HttpStatusError {
                serial: serial.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LookupSettings;
    use crate::utils::error::ErrorCategory;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn settings_for(server: &MockServer) -> LookupSettings {
        LookupSettings {
            endpoint_template: server.url("/ibapp/il/WarrantyStatus.jsp?serial={serial}"),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_request_url_embeds_serial() {
        let client = LenovoClient::new(&LookupSettings::default()).unwrap();
        assert_eq!(
            client.request_url("PF1ABCDE"),
            "https://csp.lenovo.com/ibapp/il/WarrantyStatus.jsp?serial=PF1ABCDE"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_unmodified() {
        let server = MockServer::start();
        let body = "<html><b>End Date:&nbsp;</b>2027-05-01</td></html>";
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ibapp/il/WarrantyStatus.jsp")
                .query_param("serial", "PF1ABCDE");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(body);
        });

        let client = LenovoClient::new(&settings_for(&server)).unwrap();
        let text = client.fetch("PF1ABCDE").await.unwrap();

        mock.assert();
        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/ibapp/il/WarrantyStatus.jsp");
            then.status(500);
        });

        let client = LenovoClient::new(&settings_for(&server)).unwrap();
        let err = client.fetch("BROKEN01").await.unwrap_err();

        mock.assert();
        assert!(matches!(
            err,
            WarrantyError::HttpStatusError { ref serial, status: 500 } if serial == "BROKEN01"
        ));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ibapp/il/WarrantyStatus.jsp");
            then.status(200).delay(Duration::from_millis(1500)).body("late");
        });

        let settings = LookupSettings {
            timeout: Duration::from_millis(200),
            ..settings_for(&server)
        };
        let client = LenovoClient::new(&settings).unwrap();
        let err = client.fetch("SLOW0001").await.unwrap_err();

        assert!(matches!(err, WarrantyError::HttpError(ref e) if e.is_timeout()));
    }
}
