// ── Backoffice configuration ──

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use tenra_api::{TlsMode, TransportConfig};

/// TLS verification policy (core-level mirror of the api crate's
/// `TlsMode`, so consumers don't depend on `tenra-api` directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    #[default]
    System,
    /// Accept any certificate -- staging environments only.
    DangerAcceptInvalid,
}

/// Configuration for a [`Backoffice`](crate::Backoffice) instance.
#[derive(Debug, Clone)]
pub struct BackofficeConfig {
    /// API base URL (e.g. `https://api.tenra.example`).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// HTTP transport timeout. No retry policy exists at this layer; a
    /// timed-out request is only as recoverable as the operator
    /// re-triggering the action.
    pub timeout: Duration,
    /// Path of the durable session file. `None` uses the platform data
    /// directory.
    pub session_file: Option<PathBuf>,
    /// Page size for the catalog listing endpoints that paginate.
    pub page_size: u32,
}

impl BackofficeConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            session_file: None,
            page_size: 200,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match self.tls {
                TlsVerification::System => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
