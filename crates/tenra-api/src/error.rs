use thiserror::Error;

/// Top-level error type for the `tenra-api` crate.
///
/// Covers every failure mode at the HTTP boundary: authentication,
/// transport, server-rejected requests, and payload decoding.
/// `tenra-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in failed or the bearer token was rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A call that requires a bearer token was made before sign-in.
    #[error("Not signed in -- no bearer token installed")]
    NotSignedIn,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client-build error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server responses ────────────────────────────────────────────
    /// Non-2xx HTTP status without a usable envelope.
    #[error("API HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The server returned a well-formed envelope with `success: false`.
    #[error("API rejected the request: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// `true` if the server processed the request and said no
    /// (`success: false` envelope), as opposed to the request never
    /// completing. Read paths treat rejection and transport failure
    /// differently: rejection empties the cached collection, transport
    /// failure leaves it untouched.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// `true` if re-authentication might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::NotSignedIn)
    }

    /// `true` if this is a transient transport problem worth retrying
    /// manually (no automatic retry exists at this layer).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
