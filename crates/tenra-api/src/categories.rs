// Category endpoints.
//
// The list endpoint is one of the `{data: [...]}`-shaped ones; the
// normalization in `get_page` hides that from callers.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CategoryDto, CreateCategoryRequest, Id, Page, UpdateCategoryRequest};

impl ApiClient {
    /// `GET /category` -- all categories for the tenant.
    pub async fn list_categories(&self) -> Result<Page<CategoryDto>, Error> {
        self.get_page("category", &[]).await
    }

    /// `POST /category` -- create a category.
    pub async fn create_category(&self, request: &CreateCategoryRequest) -> Result<(), Error> {
        self.post_ack("category", request).await
    }

    /// `PUT /category/{id}` -- replace a category document.
    pub async fn update_category(
        &self,
        id: &Id,
        request: &UpdateCategoryRequest,
    ) -> Result<(), Error> {
        self.put_ack(&format!("category/{id}"), request).await
    }

    /// `DELETE /category/{id}` -- remove a category.
    pub async fn delete_category(&self, id: &Id) -> Result<(), Error> {
        self.delete_ack(&format!("category/{id}")).await
    }
}
