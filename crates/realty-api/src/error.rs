use thiserror::Error;

use crate::resource::Operation;

/// Top-level error type for the `realty-api` crate.
///
/// Transport and status failures are surfaced uniformly: an expired or
/// missing token shows up as an ordinary `Http { status: 401, .. }`.
/// `realty-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// No response was received (connection refused, DNS failure, reset).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Status ──────────────────────────────────────────────────────
    /// Any non-2xx response, with the raw body for diagnostics.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request payload could not be encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    // ── Resource surface ────────────────────────────────────────────
    /// The backend does not expose this operation for the resource.
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: &'static str,
        operation: Operation,
    },
}

impl Error {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the backend rejected the bearer token (401/403).
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(e) if e.status().is_none())
    }
}
