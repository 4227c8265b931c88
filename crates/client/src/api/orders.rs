//! Order endpoints.

use tomato_mall_core::{AccountId, OrderId};

use super::paths;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Order, OrderItem, OrderRef, PaymentForm};

/// `/api/orders` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a ApiClient,
}

impl<'a> Orders<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/orders/{orderId}`: the order's product lines.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_order_items(&self, id: OrderId) -> Result<Vec<OrderItem>> {
        self.client.get(&format!("{}/{id}", paths::ORDERS)).await
    }

    /// `GET /api/orders/account/{accountId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_account_orders(&self, account: AccountId) -> Result<Vec<Order>> {
        self.client
            .get(&format!("{}/account/{account}", paths::ORDERS))
            .await
    }

    /// `POST /api/orders/{orderId}/pay`. Returns the gateway form to submit.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn pay_order(&self, id: OrderId) -> Result<PaymentForm> {
        self.client
            .post(
                &format!("{}/{id}/pay", paths::ORDERS),
                &OrderRef { order_id: id },
            )
            .await
    }

    /// `POST /api/orders/cancel/{orderId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn cancel_order(&self, id: OrderId) -> Result<String> {
        self.client
            .post(
                &format!("{}/cancel/{id}", paths::ORDERS),
                &OrderRef { order_id: id },
            )
            .await
    }
}
