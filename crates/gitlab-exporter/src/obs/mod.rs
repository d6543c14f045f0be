//! Exported license gauges.
//!
//! Gauges live in a private `prometheus::Registry` owned by the process and are
//! rendered by the `/metrics` handler. Only the scrape loop writes to them.

pub mod metrics;
