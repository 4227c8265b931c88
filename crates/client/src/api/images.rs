//! Image upload.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{info, instrument};

use super::paths;
use crate::error::{ApiError, Result};
use crate::http::ApiClient;

/// Multipart field the backend reads the upload from.
pub const FILE_FIELD: &str = "file";

/// `/api/image` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Images<'a> {
    client: &'a ApiClient,
}

impl<'a> Images<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/image` (multipart field `file`). Returns the stored URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn upload_image(&self, form: Form) -> Result<String> {
        self.client.post_multipart(paths::IMAGES, form).await
    }

    /// Read a local file and upload it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the file cannot be read, or `ApiError` if
    /// the upload fails.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_image_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let form = image_form(bytes, file_name)?;
        let url = self.upload_image(form).await?;
        info!(url = %url, "Uploaded image");
        Ok(url)
    }
}

/// Build the single-file multipart body the upload endpoints expect.
///
/// # Errors
///
/// Returns `ApiError::InvalidRequest` if the content type is rejected.
pub fn image_form(bytes: Vec<u8>, file_name: impl Into<String>) -> Result<Form> {
    let file_name = file_name.into();
    let part = Part::bytes(bytes)
        .file_name(file_name.clone())
        .mime_str(mime_for(&file_name))
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    Ok(Form::new().part(FILE_FIELD, part))
}

/// Content type by file extension.
fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
