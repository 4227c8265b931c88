//! Advertisement endpoints.

use tomato_mall_core::AdvertisementId;

use super::paths;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::Advertisement;

/// `/api/advertisements` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Advertisements<'a> {
    client: &'a ApiClient,
}

impl<'a> Advertisements<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/advertisements`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_advertisements(&self) -> Result<Vec<Advertisement>> {
        self.client.get(paths::ADVERTISEMENTS).await
    }

    /// `POST /api/advertisements`. The id, if set, is ignored by the backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_advertisement(&self, ad: &Advertisement) -> Result<Advertisement> {
        self.client.post(paths::ADVERTISEMENTS, ad).await
    }

    /// `PATCH /api/advertisements`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_advertisement(&self, ad: &Advertisement) -> Result<String> {
        self.client.patch(paths::ADVERTISEMENTS, ad).await
    }

    /// `DELETE /api/advertisements/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_advertisement(&self, id: AdvertisementId) -> Result<String> {
        self.client
            .delete(&format!("{}/{id}", paths::ADVERTISEMENTS))
            .await
    }
}
