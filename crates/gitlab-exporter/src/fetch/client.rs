use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};

use gitlab_exporter_core::error::{ExporterError, Result};

use super::LicenseSource;

/// Single GET against the license URL, bounded by a request timeout.
/// No retries; the next scheduled cycle is the retry.
pub struct HttpLicenseClient {
    http: Client,
    url: String,
}

impl HttpLicenseClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExporterError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { http, url })
    }

    pub async fn get_body(&self) -> Result<Bytes> {
        let resp = self.http.get(&self.url).send().await.map_err(transport)?;

        match resp.status() {
            StatusCode::OK => resp.bytes().await.map_err(transport),
            StatusCode::UNAUTHORIZED => Err(ExporterError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ExporterError::Forbidden),
            other => Err(ExporterError::UnexpectedStatus(other.as_u16())),
        }
    }
}

#[async_trait]
impl LicenseSource for HttpLicenseClient {
    async fn fetch(&self) -> Result<Bytes> {
        self.get_body().await
    }
}

// The URL carries the private token; strip it before the error reaches a log line.
fn transport(e: reqwest::Error) -> ExporterError {
    ExporterError::Transport(e.without_url().to_string())
}
