// ── Core error types ──
//
// User-facing errors from tenra-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<tenra_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not signed in -- run sign-in first")]
    NotSignedIn,

    /// Manager/staff operation that needs the account's store binding,
    /// but the account has none.
    #[error("Account '{username}' is not bound to a store")]
    NoStoreBound { username: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The server processed the request and said no (`success: false`).
    #[error("Rejected by server: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Cannot reach the API: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Configuration / persistence ──────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Session storage error: {message}")]
    SessionStore { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tenra_api::Error> for CoreError {
    fn from(err: tenra_api::Error) -> Self {
        match err {
            tenra_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tenra_api::Error::NotSignedIn => CoreError::NotSignedIn,
            tenra_api::Error::Rejected { message } => CoreError::Rejected { message },
            tenra_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            tenra_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tenra_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                reason: format!("TLS error: {msg}"),
            },
            tenra_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            tenra_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Malformed server response: {message}"),
                status: None,
            },
        }
    }
}
