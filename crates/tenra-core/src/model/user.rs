// ── User domain type and role authorization ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;
use super::store::StoreRef;

/// Account role within the tenant.
///
/// Authorization here gates only which actions a consumer may *offer*;
/// the server performs its own check on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
}

impl UserRole {
    /// Admin-only surfaces: category management, tenant-wide user
    /// administration.
    pub fn is_authorized_for_admin(self) -> bool {
        self == Self::Admin
    }

    /// Manager surfaces: store staff, order handling.
    pub fn is_authorized_for_manager(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// A tenant account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    /// The store this account works at. Absent for tenant admins.
    #[serde(default)]
    pub store: Option<StoreRef>,
}

impl User {
    /// "First Last" when name parts exist, else the username.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(one), None) | (None, Some(one)) => one.to_owned(),
            (None, None) => self.username.clone(),
        }
    }
}
