//! Exporter config loader (process environment).
//!
//! Settings are read once at startup. `from_lookup` takes the variable source
//! as a closure with the same contract as `std::env::var`, so tests can resolve
//! configs without touching the real env.

pub mod schema;

use std::env::VarError;
use std::net::SocketAddr;
use std::time::Duration;

use gitlab_exporter_core::error::{ExporterError, Result};

pub use schema::{Config, DEFAULT_LISTEN, DEFAULT_SCRAPE_INTERVAL_SECS, LICENSE_PATH};

pub const ENV_TOKEN: &str = "GITLAB_TOKEN";
pub const ENV_URL: &str = "GITLAB_URL";
pub const ENV_LISTEN: &str = "GITLAB_EXPORTER_LISTEN";
pub const ENV_SCRAPE_INTERVAL_SECS: &str = "GITLAB_SCRAPE_INTERVAL_SECS";

pub fn from_env() -> Result<Config> {
    from_lookup(|key| std::env::var(key))
}

pub fn from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    // Set-but-empty counts as present.
    let gitlab_token = read(&lookup, ENV_TOKEN)?.ok_or(ExporterError::MissingEnv(ENV_TOKEN))?;
    let gitlab_url = read(&lookup, ENV_URL)?.ok_or(ExporterError::MissingEnv(ENV_URL))?;

    let listen = match read(&lookup, ENV_LISTEN)? {
        Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
            ExporterError::BadConfig(format!("{ENV_LISTEN} must be a valid socket address: {e}"))
        })?,
        None => schema::default_listen(),
    };

    let scrape_interval = match read(&lookup, ENV_SCRAPE_INTERVAL_SECS)? {
        Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
            ExporterError::BadConfig(format!("{ENV_SCRAPE_INTERVAL_SECS} must be an integer: {e}"))
        })?,
        None => Duration::from_secs(DEFAULT_SCRAPE_INTERVAL_SECS),
    };

    let cfg = Config {
        gitlab_url,
        gitlab_token,
        listen,
        scrape_interval,
        request_timeout: schema::default_request_timeout(),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Only an absent variable is `None`; a set but non-unicode one is a config error.
fn read<F>(lookup: &F, key: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    match lookup(key) {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            Err(ExporterError::BadConfig(format!("{key} is not valid unicode")))
        }
    }
}
