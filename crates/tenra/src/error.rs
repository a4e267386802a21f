//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use tenra_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(
        code(tenra::not_signed_in),
        help("Sign in first: tenra login")
    )]
    NotSignedIn,

    #[error("Sign-in failed: {message}")]
    #[diagnostic(
        code(tenra::auth_failed),
        help("Check the phone number and password, then retry: tenra login")
    )]
    AuthFailed { message: String },

    // ── Authorization ────────────────────────────────────────────────
    #[error("'{action}' requires the {required} role")]
    #[diagnostic(
        code(tenra::not_authorized),
        help("Your account role is '{actual}'. Ask a tenant admin to perform this action.")
    )]
    NotAuthorized {
        action: String,
        required: &'static str,
        actual: String,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    #[diagnostic(code(tenra::not_found))]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("No store selected")]
    #[diagnostic(
        code(tenra::no_store),
        help("Pass --store <id>, or sign in with an account bound to a store.")
    )]
    NoStoreSelected,

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(tenra::validation))]
    Validation { field: String, reason: String },

    // ── Server / transport ───────────────────────────────────────────
    #[error("The server rejected the request: {message}")]
    #[diagnostic(code(tenra::rejected))]
    Rejected { message: String },

    #[error("Cannot reach the API: {reason}")]
    #[diagnostic(
        code(tenra::connection_failed),
        help("Check your network and the api_url in your profile.")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(tenra::timeout),
        help("The server did not answer in time. Retry, or raise --timeout.")
    )]
    Timeout,

    #[error("API error: {message}")]
    #[diagnostic(code(tenra::api))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No configuration found")]
    #[diagnostic(
        code(tenra::no_config),
        help("Create {path} with an api_url, or pass --api-url.")
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(tenra::config))]
    Config(#[from] tenra_config::ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(tenra::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Stable exit code for scripting.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSignedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotAuthorized { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NoStoreSelected | Self::Validation { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Rejected { .. } | Self::Api { .. } | Self::Config(_) | Self::Io(_) => {
                exit_code::GENERAL
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotSignedIn => Self::NotSignedIn,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NoStoreBound { .. } => Self::NoStoreSelected,
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                entity_type,
                identifier,
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Rejected { message } => Self::Rejected { message },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Config { message } | CoreError::SessionStore { message } => {
                Self::Api { message }
            }
        }
    }
}
