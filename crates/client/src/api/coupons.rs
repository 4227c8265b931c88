//! Coupon endpoints.

use tomato_mall_core::{AccountId, CouponId};

use super::paths;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{AccountCoupon, Coupon};

/// `/api/coupons` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Coupons<'a> {
    client: &'a ApiClient,
}

impl<'a> Coupons<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/coupons/all`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>> {
        self.client.get(&format!("{}/all", paths::COUPONS)).await
    }

    /// `GET /api/coupons/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_coupon(&self, id: CouponId) -> Result<Coupon> {
        self.client.get(&format!("{}/{id}", paths::COUPONS)).await
    }

    /// `POST /api/coupons`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_coupon(&self, coupon: &Coupon) -> Result<String> {
        self.client.post(paths::COUPONS, coupon).await
    }

    /// `PUT /api/coupons/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_coupon(&self, id: CouponId, coupon: &Coupon) -> Result<String> {
        self.client
            .put(&format!("{}/{id}", paths::COUPONS), coupon)
            .await
    }

    /// `DELETE /api/coupons/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_coupon(&self, id: CouponId) -> Result<String> {
        self.client
            .delete(&format!("{}/{id}", paths::COUPONS))
            .await
    }

    /// `POST /api/coupons/use`: spend coupons held by an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn use_coupon(&self, relation: &AccountCoupon) -> Result<String> {
        self.client
            .post(&format!("{}/use", paths::COUPONS), relation)
            .await
    }

    /// `POST /api/coupons/receive`: claim coupons for an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn receive_coupon(&self, relation: &AccountCoupon) -> Result<String> {
        self.client
            .post(&format!("{}/receive", paths::COUPONS), relation)
            .await
    }

    /// `GET /api/coupons/account/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_account_coupons(&self, account: AccountId) -> Result<Vec<AccountCoupon>> {
        self.client
            .get(&format!("{}/account/{account}", paths::COUPONS))
            .await
    }
}
