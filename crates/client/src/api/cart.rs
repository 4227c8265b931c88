//! Shopping cart and checkout endpoints.

use tomato_mall_core::{CartItemId, ProductId};
use tracing::instrument;

use super::paths;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{AddToCart, AppliedCoupon, CartItem, CartList, CheckoutRequest, Order, QuantityUpdate};

/// `/api/cart` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Cart<'a> {
    client: &'a ApiClient,
}

impl<'a> Cart<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/cart`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_cart(&self) -> Result<CartList> {
        self.client.get(paths::CART).await
    }

    /// `POST /api/cart` with `{productId, quantity}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<CartItem> {
        self.client
            .post(
                paths::CART,
                &AddToCart {
                    product_id,
                    quantity,
                },
            )
            .await
    }

    /// `PATCH /api/cart/{cartItemId}` with `{quantity}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_cart_item(&self, id: CartItemId, quantity: u32) -> Result<String> {
        self.client
            .patch(&format!("{}/{id}", paths::CART), &QuantityUpdate { quantity })
            .await
    }

    /// `DELETE /api/cart/{cartItemId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_cart_item(&self, id: CartItemId) -> Result<String> {
        self.client.delete(&format!("{}/{id}", paths::CART)).await
    }

    /// `POST /api/cart/checkout`. A coupon is sent as `couponType` and
    /// `couponValue` query parameters; without one they are omitted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, request), fields(items = request.cart_item_ids.len()))]
    pub async fn checkout(
        &self,
        request: &CheckoutRequest,
        coupon: Option<AppliedCoupon>,
    ) -> Result<Order> {
        let mut call = ApiRequest::post(format!("{}/checkout", paths::CART)).json(request)?;
        if let Some(coupon) = coupon {
            call = call
                .query("couponType", i32::from(coupon.discount_type))
                .query("couponValue", coupon.value);
        }
        self.client.call(call).await
    }
}
