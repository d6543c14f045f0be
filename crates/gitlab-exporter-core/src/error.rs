//! Shared error type across the exporter crates.

use thiserror::Error;

/// Stable error classification (used as a log field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid startup configuration.
    Config,
    /// Network-level failure (refused, timeout, DNS, body read).
    Transport,
    /// HTTP 401 from the license API.
    Unauthorized,
    /// HTTP 403 from the license API.
    Forbidden,
    /// Any other non-200 status.
    UnexpectedStatus,
    /// Payload could not be turned into a snapshot.
    Decode,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Transport => "transport",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::UnexpectedStatus => "unexpected_status",
            ErrorKind::Decode => "decode",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("invalid configuration: {0}")]
    BadConfig(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("401 unauthorized")]
    Unauthorized,
    #[error("403 the request requires higher privileges than provided by the access token")]
    Forbidden,
    #[error("unexpected HTTP status code: {0}")]
    UnexpectedStatus(u16),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::MissingEnv(_) | ExporterError::BadConfig(_) => ErrorKind::Config,
            ExporterError::Transport(_) => ErrorKind::Transport,
            ExporterError::Unauthorized => ErrorKind::Unauthorized,
            ExporterError::Forbidden => ErrorKind::Forbidden,
            ExporterError::UnexpectedStatus(_) => ErrorKind::UnexpectedStatus,
            ExporterError::Decode(_) => ErrorKind::Decode,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Only configuration errors stop the process; everything else is per-cycle.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}
