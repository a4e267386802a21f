// Product and store-product endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CreateProductRequest, Id, Page, ProductDto, StoreProductDto, UpdateProductRequest,
    UpdateStoreProductRequest,
};

impl ApiClient {
    /// `GET /products?page&pageSize` -- the tenant-level catalog.
    pub async fn list_products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<ProductDto>, Error> {
        let params = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.get_page("products", &params).await
    }

    /// `POST /products` -- add a product to the catalog.
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<(), Error> {
        self.post_ack("products", request).await
    }

    /// `PUT /products/{id}` -- update a catalog product.
    pub async fn update_product(
        &self,
        id: &Id,
        request: &UpdateProductRequest,
    ) -> Result<(), Error> {
        self.put_ack(&format!("products/{id}"), request).await
    }

    /// `DELETE /products/{id}` -- remove a catalog product.
    pub async fn delete_product(&self, id: &Id) -> Result<(), Error> {
        self.delete_ack(&format!("products/{id}")).await
    }

    // ── Store products ──────────────────────────────────────────────

    /// `GET /products/{store_id}/products` -- the per-store assortment
    /// with inventory counts and store-scoped prices.
    pub async fn list_store_products(
        &self,
        store_id: &Id,
    ) -> Result<Page<StoreProductDto>, Error> {
        self.get_page(&format!("products/{store_id}/products"), &[])
            .await
    }

    /// `PUT /products/{store_id}/products/{upc}` -- update inventory or
    /// the store-scoped price override for one product.
    pub async fn update_store_product(
        &self,
        store_id: &Id,
        upc: &str,
        request: &UpdateStoreProductRequest,
    ) -> Result<(), Error> {
        self.put_ack(&format!("products/{store_id}/products/{upc}"), request)
            .await
    }
}
