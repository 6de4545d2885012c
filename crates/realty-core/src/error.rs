// ── Core error types ──
//
// User-facing errors from realty-core. Transport detail is flattened into
// strings so errors can be cloned into snapshots and notices. The
// `From<realty_api::Error>` impl keeps the Network / Http split intact.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Client-side validation ───────────────────────────────────────
    /// Required fields are empty. Never reaches the network.
    #[error("Missing required field(s): {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // ── Transport ────────────────────────────────────────────────────
    /// No response was received.
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// The server answered with a non-2xx status.
    #[error("Request rejected (HTTP {status}){}", body_suffix(.body))]
    Http { status: u16, body: String },

    /// A 2xx response could not be understood.
    #[error("Unexpected response: {message}")]
    Decode { message: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Operation not supported: {operation} {entity}")]
    Unsupported {
        entity: &'static str,
        operation: String,
    },

    // ── Form sessions ────────────────────────────────────────────────
    #[error("Another add or edit is already in progress")]
    FormBusy,

    #[error("No add or edit is in progress")]
    FormIdle,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn body_suffix(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        let preview: String = trimmed.chars().take(120).collect();
        format!(": {preview}")
    }
}

impl CoreError {
    /// The backend refused the bearer token (401/403).
    ///
    /// No redirect or refresh happens here; callers phrase the notice.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidInput { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<realty_api::Error> for CoreError {
    fn from(err: realty_api::Error) -> Self {
        match err {
            realty_api::Error::Network(ref e) => match e.status() {
                Some(status) => CoreError::Http {
                    status: status.as_u16(),
                    body: String::new(),
                },
                None => CoreError::Network {
                    reason: e.to_string(),
                },
            },
            realty_api::Error::Http { status, body } => CoreError::Http { status, body },
            realty_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            realty_api::Error::Client(message) => CoreError::Config { message },
            realty_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
            realty_api::Error::Encoding(message) => CoreError::Internal(message),
            realty_api::Error::Unsupported {
                resource,
                operation,
            } => CoreError::Unsupported {
                entity: resource,
                operation: operation.to_string(),
            },
        }
    }
}
