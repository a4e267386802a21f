// ── Session domain type ──

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use super::user::{User, UserRole};

/// An authenticated session: the bearer token, the signed-in user, and
/// the server's expiry hint.
///
/// Created on sign-in, mirrored to the durable session file (auth
/// fields only), cleared on sign-out.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub user: User,
    pub token_expired_time: Option<DateTime<Utc>>,
}

impl Session {
    /// `true` once the server-provided expiry hint has passed.
    /// Sessions without a hint are treated as live until the server
    /// rejects them.
    pub fn is_expired(&self) -> bool {
        self.token_expired_time.is_some_and(|t| t <= Utc::now())
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Admin-only surfaces (category management, tenant users).
    pub fn is_authorized_for_admin(&self) -> bool {
        self.user.role.is_authorized_for_admin()
    }

    /// Manager surfaces (store staff, order handling).
    pub fn is_authorized_for_manager(&self) -> bool {
        self.user.role.is_authorized_for_manager()
    }
}
