//! GitLab license exporter library entry.
//!
//! Wires the config resolver, license fetcher, scrape loop, gauge set and the
//! `/metrics` router. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod fetch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod scrape;
