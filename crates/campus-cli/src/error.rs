//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use campus_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No backend server configured")]
    #[diagnostic(
        code(campus::no_server),
        help(
            "Pass --server, set CAMPUS_SERVER, or put `server = \"https://...\"`\n\
             in the config file at {config_path}"
        )
    )]
    NoServer { config_path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(campus::validation))]
    Validation { field: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(code(campus::not_logged_in), help("Sign in first: campus login"))]
    NotLoggedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(campus::auth_failed),
        help("The stored session was cleared. Sign in again: campus login")
    )]
    AuthFailed { message: String },

    #[error("Permission denied")]
    #[diagnostic(code(campus::forbidden))]
    Forbidden,

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(campus::api_error))]
    Api { code: i64, message: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error("I/O error: {0}")]
    #[diagnostic(code(campus::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(campus::internal))]
    Internal(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotLoggedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Forbidden => exit_code::PERMISSION,
            Self::Api { code: 404, .. } => exit_code::NOT_FOUND,
            Self::NoServer { .. } | Self::Validation { .. } => exit_code::GENERAL,
            Self::Internal(msg) if msg.contains("network") || msg.contains("timed out") => {
                exit_code::CONNECTION
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationRequired { message } => Self::AuthFailed { message },
            CoreError::Forbidden => Self::Forbidden,
            CoreError::Api { code, message } => Self::Api { code, message },
            CoreError::Storage(e) => Self::Io(e),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<campus_api::Error> for CliError {
    fn from(err: campus_api::Error) -> Self {
        CoreError::from(err).into()
    }
}
