//! License fetcher.
//!
//! `LicenseSource` is the seam the scrape loop pulls raw bodies through;
//! `HttpLicenseClient` is the production implementation over reqwest.

pub mod client;

use async_trait::async_trait;
use bytes::Bytes;

use gitlab_exporter_core::error::Result;

pub use client::HttpLicenseClient;

/// Something that can hand back one raw license body per call.
#[async_trait]
pub trait LicenseSource: Send + Sync {
    async fn fetch(&self) -> Result<Bytes>;
}
