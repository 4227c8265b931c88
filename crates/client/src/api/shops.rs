//! Shop endpoints.

use tomato_mall_core::{AccountId, ShopId};

use super::paths;
use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::models::Shop;

/// `/api/shop` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Shops<'a> {
    client: &'a ApiClient,
}

impl<'a> Shops<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/shop/all`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_shops(&self) -> Result<Vec<Shop>> {
        self.client.get(&format!("{}/all", paths::SHOPS)).await
    }

    /// `POST /api/shop/create`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_shop(&self, shop: &Shop) -> Result<String> {
        self.client
            .post(&format!("{}/create", paths::SHOPS), shop)
            .await
    }

    /// `GET /api/shop/detail/{shopId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_shop(&self, id: ShopId) -> Result<Shop> {
        self.client
            .get(&format!("{}/detail/{id}", paths::SHOPS))
            .await
    }

    /// `PUT /api/shop/update/{shopId}`, using the shop's own id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if `shop` has no id, or `ApiError`
    /// if the request fails.
    pub async fn update_shop(&self, shop: &Shop) -> Result<String> {
        let id = shop
            .shop_id
            .ok_or_else(|| ApiError::InvalidRequest("cannot update a shop without an id".to_string()))?;
        self.client
            .put(&format!("{}/update/{id}", paths::SHOPS), shop)
            .await
    }

    /// `DELETE /api/shop/delete/{shopId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_shop(&self, id: ShopId) -> Result<String> {
        self.client
            .delete(&format!("{}/delete/{id}", paths::SHOPS))
            .await
    }

    /// `GET /api/shop/owner/{ownerId}`: the shop owned by an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_owned_shop(&self, owner: AccountId) -> Result<ShopId> {
        self.client
            .get(&format!("{}/owner/{owner}", paths::SHOPS))
            .await
    }
}
