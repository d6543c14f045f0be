//! License gauge set.
//!
//! Every gauge is registered at construction so the full metric surface is
//! exported from the first request on, with zero values until a cycle succeeds.

use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};

use gitlab_exporter_core::error::{ExporterError, Result};
use gitlab_exporter_core::LicenseSnapshot;

pub struct LicenseMetrics {
    registry: Registry,
    pub active_users: Gauge,
    pub user_limit: Gauge,
    pub license_expires_at: Gauge,
    pub maximum_user_count: Gauge,
    pub license_expired: Gauge,
    pub user_overage: Gauge,
    pub scrape_status: Gauge,
}

impl LicenseMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        Ok(Self {
            active_users: gauge(&registry, "gitlab_active_users", "Active users")?,
            user_limit: gauge(&registry, "gitlab_user_limit", "License user limit")?,
            license_expires_at: gauge(
                &registry,
                "gitlab_license_expires_at",
                "License expiration date as a Unix timestamp",
            )?,
            maximum_user_count: gauge(
                &registry,
                "gitlab_maximum_user_count",
                "Maximum number of users since license started",
            )?,
            license_expired: gauge(
                &registry,
                "gitlab_license_expired",
                "License expiration status (1 = expired)",
            )?,
            user_overage: gauge(
                &registry,
                "gitlab_user_overage",
                "Difference between active users and licensed users",
            )?,
            scrape_status: gauge(
                &registry,
                "gitlab_scrape_status",
                "Exporter scrape status (1 = last cycle succeeded)",
            )?,
            registry,
        })
    }

    /// Overwrite every license gauge. Fields are set one by one, not atomically.
    pub fn record_snapshot(&self, snap: &LicenseSnapshot) {
        self.active_users.set(snap.active_users);
        self.user_limit.set(snap.user_limit);
        self.license_expires_at.set(snap.expires_at_secs);
        self.maximum_user_count.set(snap.maximum_user_count);
        self.license_expired.set(snap.expired_indicator());
        self.user_overage.set(snap.overage);
    }

    pub fn set_scrape_status(&self, ok: bool) {
        self.scrape_status.set(if ok { 1.0 } else { 0.0 });
    }

    /// Content type of `render` output.
    pub fn format_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| ExporterError::Internal(format!("metrics encode failed: {e}")))?;
        String::from_utf8(buf)
            .map_err(|e| ExporterError::Internal(format!("metrics not utf-8: {e}")))
    }
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<Gauge> {
    let g = Gauge::with_opts(Opts::new(name, help))
        .map_err(|e| ExporterError::Internal(format!("gauge {name}: {e}")))?;
    registry
        .register(Box::new(g.clone()))
        .map_err(|e| ExporterError::Internal(format!("register {name}: {e}")))?;
    Ok(g)
}
