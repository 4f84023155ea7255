// ── Core error types ──
//
// User-facing errors from campus-core. Consumers never see raw HTTP
// statuses or envelope codes directly; the `From<campus_api::Error>`
// impl translates transport-layer failures into domain variants while
// keeping the message the interceptor would show.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in: {message}")]
    AuthenticationRequired { message: String },

    #[error("Permission denied")]
    Forbidden,

    // ── Backend failures ─────────────────────────────────────────────
    #[error("{message}")]
    Api { code: i64, message: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message to surface to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationRequired { message } => message.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Forbidden => "permission denied".to_owned(),
            Self::Storage(e) => format!("session storage error: {e}"),
            Self::Internal(msg) => msg.clone(),
        }
    }

    /// Returns `true` if this failure invalidates the session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<campus_api::Error> for CoreError {
    fn from(err: campus_api::Error) -> Self {
        let message = err.user_message();
        match err {
            e if e.is_unauthenticated() => Self::AuthenticationRequired { message },
            campus_api::Error::Api { code, .. } => Self::Api { code, message },
            campus_api::Error::Http { status, .. } => Self::Api {
                code: i64::from(status),
                message,
            },
            _ => Self::Internal(message),
        }
    }
}
