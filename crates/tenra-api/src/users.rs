// Tenant user endpoints.
//
// User listing is role-dependent: admins see the whole tenant, managers
// only their store's staff. Account creation goes through per-role
// endpoints (`create-staff`, `create-manager`) rather than a role field.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CreateUserRequest, Id, Page, UpdateUserRequest, UserDto};

impl ApiClient {
    /// `GET /tenant/users` -- every account in the tenant (admin only).
    pub async fn list_tenant_users(&self) -> Result<Page<UserDto>, Error> {
        self.get_page("tenant/users", &[]).await
    }

    /// `GET /tenant/staffs/{store_id}` -- staff of one store (manager view).
    pub async fn list_store_staff(&self, store_id: &Id) -> Result<Page<UserDto>, Error> {
        self.get_page(&format!("tenant/staffs/{store_id}"), &[]).await
    }

    /// `POST /tenant/create-staff` -- create a staff account.
    pub async fn create_staff(&self, request: &CreateUserRequest) -> Result<(), Error> {
        self.post_ack("tenant/create-staff", request).await
    }

    /// `POST /tenant/create-manager` -- create a manager account.
    pub async fn create_manager(&self, request: &CreateUserRequest) -> Result<(), Error> {
        self.post_ack("tenant/create-manager", request).await
    }

    /// `PUT /tenant/users/{id}` -- update an account. Also used for
    /// activate/deactivate via the `is_active` field.
    pub async fn update_user(&self, id: &Id, request: &UpdateUserRequest) -> Result<(), Error> {
        self.put_ack(&format!("tenant/users/{id}"), request).await
    }
}
