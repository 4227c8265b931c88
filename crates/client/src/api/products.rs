//! Product and inventory endpoints.

use tomato_mall_core::{ProductId, ShopId};

use super::paths;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Product, Stockpile};

/// `/api/products` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a ApiClient,
}

#[derive(serde::Serialize)]
struct StockpileUpdate {
    amount: i32,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/products`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.client.get(paths::PRODUCTS).await
    }

    /// `GET /api/products/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.client
            .get(&format!("{}/{id}", paths::PRODUCTS))
            .await
    }

    /// `GET /api/products/shop/{shopId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_shop_products(&self, shop: ShopId) -> Result<Vec<Product>> {
        self.client
            .get(&format!("{}/shop/{shop}", paths::PRODUCTS))
            .await
    }

    /// `POST /api/products`. Returns the stored product with its id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_product(&self, product: &Product) -> Result<Product> {
        self.client.post(paths::PRODUCTS, product).await
    }

    /// `PUT /api/products`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_product(&self, product: &Product) -> Result<String> {
        self.client.put(paths::PRODUCTS, product).await
    }

    /// `DELETE /api/products/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<String> {
        self.client
            .delete(&format!("{}/{id}", paths::PRODUCTS))
            .await
    }

    /// `GET /api/products/stockpile/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_stockpile(&self, id: ProductId) -> Result<Stockpile> {
        self.client
            .get(&format!("{}/stockpile/{id}", paths::PRODUCTS))
            .await
    }

    /// `PATCH /api/products/stockpile/{id}` with `{amount}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_stockpile(&self, id: ProductId, amount: i32) -> Result<String> {
        self.client
            .patch(
                &format!("{}/stockpile/{id}", paths::PRODUCTS),
                &StockpileUpdate { amount },
            )
            .await
    }
}
