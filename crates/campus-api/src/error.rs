use thiserror::Error;

/// Top-level error type for the `campus-api` crate.
///
/// Covers every failure mode across the HTTP and WebSocket surfaces.
/// `campus-core` maps these into user-facing diagnostics; the raw API
/// detail (envelope code, HTTP status, response body) stays here.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the request as unauthenticated: either an
    /// HTTP 401 or an envelope with `code == 401`.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Business ────────────────────────────────────────────────────
    /// Envelope-level failure: the response arrived with HTTP 200 but
    /// `code != 200`. The meaning is carried by `code` and `message`.
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// A non-success HTTP status with no usable envelope.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Http {
        status: u16,
        /// Server-provided message, when the body carried one.
        message: Option<String>,
    },

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── WebSocket ───────────────────────────────────────────────────
    /// WebSocket connection failed.
    #[error("WebSocket connection failed: {0}")]
    WebSocketConnect(String),

    /// WebSocket closed unexpectedly.
    #[error("WebSocket closed (code {code}): {reason}")]
    WebSocketClosed { code: u16, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this failure means the session is no longer
    /// valid and the caller must log out and re-authenticate.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Http { status: 401, .. }
        )
    }

    /// The message to surface to the user for this failure.
    ///
    /// Server-provided messages win when present; otherwise each failure
    /// class gets a fixed fallback. Transport errors with no response are
    /// classified as timeout, network error, or generic failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message } => non_empty(message)
                .unwrap_or("login expired, please sign in again")
                .to_owned(),

            Self::Api { message, .. } => {
                non_empty(message).unwrap_or("request failed").to_owned()
            }

            Self::Http { status, message } => message
                .as_deref()
                .and_then(non_empty)
                .map_or_else(|| status_fallback(*status), str::to_owned),

            Self::Transport(e) => {
                if e.is_timeout() {
                    "request timed out, please try again later".to_owned()
                } else if e.is_connect() {
                    "network error, please check your connection".to_owned()
                } else if let Some(status) = e.status() {
                    status_fallback(status.as_u16())
                } else {
                    "request failed".to_owned()
                }
            }

            Self::InvalidUrl(_)
            | Self::WebSocketConnect(_)
            | Self::WebSocketClosed { .. }
            | Self::Deserialization { .. } => "request failed".to_owned(),
        }
    }
}

/// Fixed fallback messages per HTTP status, matching what the backend's
/// clients have always shown.
fn status_fallback(status: u16) -> String {
    match status {
        400 => "invalid request parameters".to_owned(),
        401 => "login expired, please sign in again".to_owned(),
        403 => "permission denied".to_owned(),
        404 => "resource not found".to_owned(),
        429 => "too many requests, please try again later".to_owned(),
        500 => "server error".to_owned(),
        other => format!("request failed ({other})"),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}
