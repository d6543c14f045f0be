use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use gitlab_exporter_core::error::{ExporterError, Result};

/// Fixed license query path appended to `GITLAB_URL`.
pub const LICENSE_PATH: &str = "/api/v4/license";

pub const DEFAULT_LISTEN: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 9090));
pub const DEFAULT_SCRAPE_INTERVAL_SECS: u64 = 60 * 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub gitlab_url: String,
    pub gitlab_token: String,
    pub listen: SocketAddr,
    pub scrape_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(60..=86_400).contains(&self.scrape_interval.as_secs()) {
            return Err(ExporterError::BadConfig(
                "scrape interval must be between 60 and 86400 seconds".into(),
            ));
        }
        Ok(())
    }

    /// `{GITLAB_URL}/api/v4/license?private_token={GITLAB_TOKEN}`, not validated.
    pub fn license_url(&self) -> String {
        format!(
            "{}{}?private_token={}",
            self.gitlab_url, LICENSE_PATH, self.gitlab_token
        )
    }
}

// Keep the token out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gitlab_url", &self.gitlab_url)
            .field("gitlab_token", &"<redacted>")
            .field("listen", &self.listen)
            .field("scrape_interval", &self.scrape_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

pub(crate) fn default_listen() -> SocketAddr {
    DEFAULT_LISTEN
}

pub(crate) fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}
