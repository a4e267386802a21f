// Order endpoints.
//
// The order lifecycle itself is owned by the server; this surface only
// lists a store's orders and requests status transitions.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Id, OrderDto, Page, UpdateOrderStatusRequest};

impl ApiClient {
    /// `GET /orders/store/{store_id}` -- orders placed at one store.
    pub async fn list_store_orders(&self, store_id: &Id) -> Result<Page<OrderDto>, Error> {
        self.get_page(&format!("orders/store/{store_id}"), &[]).await
    }

    /// `PUT /orders/{id}` -- request a status transition.
    pub async fn update_order_status(&self, id: &Id, status: &str) -> Result<(), Error> {
        let request = UpdateOrderStatusRequest {
            status: status.to_owned(),
        };
        self.put_ack(&format!("orders/{id}"), &request).await
    }
}
