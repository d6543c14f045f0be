//! License scrape loop.
//!
//! One cycle is fetch -> parse -> publish. Cycles run back to back with a fixed
//! wait in between, starting immediately, until the process exits. A failed
//! cycle only flips `gitlab_scrape_status` to 0; license gauges keep their last
//! published values.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use gitlab_exporter_core::error::Result;
use gitlab_exporter_core::{parse_license, LicenseSnapshot};

use crate::fetch::LicenseSource;
use crate::obs::metrics::LicenseMetrics;

pub struct Scraper {
    source: Arc<dyn LicenseSource>,
    metrics: Arc<LicenseMetrics>,
    interval: Duration,
}

impl Scraper {
    pub fn new(
        source: Arc<dyn LicenseSource>,
        metrics: Arc<LicenseMetrics>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            metrics,
            interval,
        }
    }

    /// Run a single cycle and publish its outcome.
    pub async fn run_once(&self) -> Result<LicenseSnapshot> {
        match self.cycle().await {
            Ok(snap) => {
                self.metrics.record_snapshot(&snap);
                self.metrics.set_scrape_status(true);
                info!(
                    active_users = snap.active_users,
                    user_limit = snap.user_limit,
                    expires_at = %snap.expires_at,
                    expired = snap.expired,
                    "license scraped successfully"
                );
                Ok(snap)
            }
            Err(e) => {
                self.metrics.set_scrape_status(false);
                error!(error = %e, kind = e.kind().as_str(), "license scrape failed");
                Err(e)
            }
        }
    }

    async fn cycle(&self) -> Result<LicenseSnapshot> {
        let body = self.source.fetch().await?;
        parse_license(&body)
    }

    /// Loop forever: cycle, then wait `interval`. Never cancels itself.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "license scraper started");
        loop {
            // errors are already logged and reflected in scrape_status
            let _ = self.run_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
