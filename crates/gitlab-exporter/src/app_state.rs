//! Shared application state for the metrics server.

use std::sync::Arc;

use gitlab_exporter_core::error::Result;

use crate::obs::metrics::LicenseMetrics;

#[derive(Clone)]
pub struct AppState {
    metrics: Arc<LicenseMetrics>,
}

impl AppState {
    /// Build the gauge set. Returns Result so main can exit cleanly on failure.
    pub fn new() -> Result<Self> {
        Ok(Self::with_metrics(Arc::new(LicenseMetrics::new()?)))
    }

    pub fn with_metrics(metrics: Arc<LicenseMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> Arc<LicenseMetrics> {
        Arc::clone(&self.metrics)
    }
}
