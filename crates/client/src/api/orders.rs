//! Order endpoints. All of these require a session.

use tracing::instrument;

use bramblefig_core::OrderId;

use crate::models::{Order, OrderDraft};

use super::{ApiError, ShopApi};

impl ShopApi {
    /// Place an order.
    ///
    /// The draft carries the priced line snapshots and the totals computed
    /// client-side at review time; the backend stores them as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, draft), fields(items = draft.order_items.len()))]
    pub async fn place_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        self.post_json("orders/add/", draft).await
    }

    /// List the current user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("orders/myorders/").await
    }

    /// Get a single order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("orders/{order_id}/")).await
    }

    /// Mark an order as paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn pay_order(&self, order_id: &OrderId) -> Result<(), ApiError> {
        self.put_unit(&format!("orders/{order_id}/pay/")).await
    }
}
