use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// URL template with a `{serial}` placeholder.
    fn endpoint_template(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// Fetches the raw warranty status page for a serial.
#[async_trait]
pub trait WarrantySource: Send + Sync {
    async fn fetch(&self, serial: &str) -> Result<String>;
}
