//! gitlab-exporter core: error types and the license payload parser.
//!
//! This crate turns the raw body of GitLab's `/api/v4/license` response into a
//! validated [`license::LicenseSnapshot`]. It carries no transport or runtime
//! dependencies so the parser can be tested on plain byte vectors.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. A malformed payload
//! must surface as `ExporterError::Decode`, never as a crash of the scrape loop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod license;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
pub use license::{parse_license, LicensePayload, LicenseSnapshot};
