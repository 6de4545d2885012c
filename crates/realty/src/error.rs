//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use realty_config::ConfigError;
use realty_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the admin API")]
    #[diagnostic(
        code(realty::connection_failed),
        help("Check that the backend is running and the profile's api_url is correct.\nReason: {reason}")
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The backend rejected the session token (HTTP {status})")]
    #[diagnostic(
        code(realty::auth_failed),
        help(
            "The token is missing or expired. Sign in again and store the new token:\n\
             realty config set-token"
        )
    )]
    AuthFailed { status: u16 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(realty::not_found),
        help("Run: realty {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(realty::api_error))]
    ApiError { message: String },

    #[error("'{operation}' is not supported for {resource_type}")]
    #[diagnostic(code(realty::unsupported))]
    Unsupported {
        resource_type: String,
        operation: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(realty::validation))]
    Validation { field: String, reason: String },

    #[error("Missing required field(s): {}", .fields.join(", "))]
    #[diagnostic(
        code(realty::missing_fields),
        help("Pass a non-blank value for each missing field.")
    )]
    MissingFields { fields: Vec<String> },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(realty::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: realty config init --api-url <URL> --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API configured")]
    #[diagnostic(
        code(realty::no_config),
        help(
            "Create a profile with: realty config init --api-url <URL>\n\
             Or pass --api-url (REALTY_API_URL).\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(realty::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {reason}")]
    #[diagnostic(
        code(realty::prompt),
        help("Pass values as flags and use --yes (-y) in non-interactive contexts.")
    )]
    Prompt { reason: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::MissingFields { .. } | Self::Prompt { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

fn list_command(entity: &str) -> String {
    match entity {
        "user" => "users list".into(),
        "property" => "properties list".into(),
        "team member" => "team list".into(),
        other => format!("{other}s list"),
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Http {
                status: status @ (401 | 403),
                ..
            } => CliError::AuthFailed { status },

            CoreError::Network { reason } => CliError::ConnectionFailed { reason },

            CoreError::Validation { missing } => CliError::MissingFields {
                fields: missing.into_iter().map(str::to_owned).collect(),
            },

            CoreError::InvalidInput { field, reason } => CliError::Validation { field, reason },

            CoreError::NotFound { entity, id } => CliError::NotFound {
                list_command: list_command(entity),
                resource_type: entity.into(),
                identifier: id,
            },

            CoreError::Unsupported { entity, operation } => CliError::Unsupported {
                resource_type: entity.into(),
                operation,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            other @ (CoreError::Http { .. }
            | CoreError::Decode { .. }
            | CoreError::FormBusy
            | CoreError::FormIdle
            | CoreError::Internal(_)) => CliError::ApiError {
                message: other.to_string(),
            },
        }
    }
}
