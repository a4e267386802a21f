// Store endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Page, StoreDto};

impl ApiClient {
    /// `GET /store?page&pageSize` -- all stores owned by the tenant.
    pub async fn list_stores(&self, page: u32, page_size: u32) -> Result<Page<StoreDto>, Error> {
        let params = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.get_page("store", &params).await
    }
}
