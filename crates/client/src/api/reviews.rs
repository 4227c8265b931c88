//! Review endpoints.

use tomato_mall_core::{ProductId, ReviewId, ShopId};

use super::paths;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::Review;

/// `/api/reviews` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Reviews<'a> {
    client: &'a ApiClient,
}

impl<'a> Reviews<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/reviews/product`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_product_review(&self, review: &Review) -> Result<String> {
        self.client
            .post(&format!("{}/product", paths::REVIEWS), review)
            .await
    }

    /// `POST /api/reviews/shop`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_shop_review(&self, review: &Review) -> Result<String> {
        self.client
            .post(&format!("{}/shop", paths::REVIEWS), review)
            .await
    }

    /// `GET /api/reviews/product/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_product_reviews(&self, id: ProductId) -> Result<Vec<Review>> {
        self.client
            .get(&format!("{}/product/{id}", paths::REVIEWS))
            .await
    }

    /// `GET /api/reviews/shop/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_shop_reviews(&self, id: ShopId) -> Result<Vec<Review>> {
        self.client
            .get(&format!("{}/shop/{id}", paths::REVIEWS))
            .await
    }

    /// `DELETE /api/reviews/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_review(&self, id: ReviewId) -> Result<String> {
        self.client
            .delete(&format!("{}/{id}", paths::REVIEWS))
            .await
    }
}
