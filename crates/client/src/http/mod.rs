//! HTTP client wrapper for the TomatoMall REST API.
//!
//! Every request goes through [`ApiClient::send`], which:
//! - attaches the stored session token in the `token` header;
//! - hands HTTP 401 to the redirect guard and returns [`ApiError::Suppressed`];
//! - turns any other non-2xx status into [`ApiError::Status`] carrying the
//!   backend's `msg`.
//!
//! Typed helpers (`get`, `post`, ...) additionally unwrap the backend's
//! `{code, msg, data}` envelope.

mod envelope;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::context::ClientContext;
use crate::error::{ApiError, Result};
use crate::session::Session;

pub use envelope::Envelope;

/// Header the backend reads the session token from.
pub const TOKEN_HEADER: &str = "token";

/// Longest slice of a response body copied into logs or error messages.
const BODY_PREVIEW_CHARS: usize = 200;

// =============================================================================
// Request / Response
// =============================================================================

/// Body of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// A request as described by the caller.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: RequestBody,
}

impl ApiRequest {
    /// Request with `method` against an API path such as `/api/products`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set a multipart body.
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A successful (2xx) response, returned unmodified.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text (lossy).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the raw body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Unwrap the backend envelope and decode its `data`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` if the envelope reports a failure code, or
    /// `ApiError::Decode` if the body or `data` does not match.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        let envelope: Envelope = serde_json::from_slice(&self.body)?;
        envelope.into_data(self.status)
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the TomatoMall REST API.
///
/// Cheap to clone; clones share the connection pool and [`ClientContext`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    context: ClientContext,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("context", &self.inner.context)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client.
    ///
    /// Rejected sessions are redirected to the context's login path if its
    /// builder set one, otherwise to `config.login_path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be initialised.
    pub fn new(config: ClientConfig, context: ClientContext) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        context.adopt_login_path(&config.login_path);

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config,
                context,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn context(&self) -> &ClientContext {
        &self.inner.context
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.inner.context.session()
    }

    /// Issue a request.
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` if no response was received.
    /// - `ApiError::Suppressed` on HTTP 401, after the redirect guard ran.
    /// - `ApiError::Status` on any other non-2xx status.
    /// - `ApiError::Session` / `ApiError::InvalidRequest` if the token cannot
    ///   be read or attached.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(method = %request.method, path = %request.path, request_id = %Uuid::new_v4())
    )]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            path,
            query,
            mut headers,
            body,
        } = request;

        if let Some(token) = self.session().token()? {
            let mut value = HeaderValue::from_str(token.expose_secret()).map_err(|_| {
                ApiError::InvalidRequest("stored token is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        let mut builder = self
            .inner
            .http
            .request(method, self.inner.config.endpoint(&path))
            .headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Request failed without a response");
                return Err(ApiError::Network(e));
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Session rejected by backend");
            self.inner.context.handle_unauthorized().await;
            return Err(ApiError::Suppressed);
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            ApiError::Network(e)
        })?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!(status = %status, message = %message, "Backend returned error status");
            return Err(ApiError::Status { status, message });
        }

        debug!(status = %status, bytes = body.len(), "Request succeeded");
        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    /// Send a request and decode the envelope's `data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`] and [`ApiResponse::into_data`].
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.into_data()
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(ApiRequest::post(path).json(body)?).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(ApiRequest::put(path).json(body)?).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(ApiRequest::patch(path).json(body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(ApiRequest::delete(path)).await
    }

    /// `POST path` with a multipart body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.call(ApiRequest::post(path).multipart(form)).await
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Pick the message to show for a failed response: the envelope `msg`, else
/// the raw body, else the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Some(msg) = envelope::message_of(body) {
        return msg;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.chars().take(BODY_PREVIEW_CHARS).collect();
    }

    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_envelope_msg() {
        let body = br#"{"code":"400","msg":"Username already exists","data":null}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Username already exists"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body_text() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"upstream timed out\n"),
            "upstream timed out"
        );
    }

    #[test]
    fn test_error_message_truncates_long_bodies() {
        let body = "x".repeat(1000);
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes()).len(),
            BODY_PREVIEW_CHARS
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message(StatusCode::FORBIDDEN, b""), "Forbidden");
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, br#"{"code":"403","msg":null}"#),
            r#"{"code":"403","msg":null}"#
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::post("/api/cart/checkout")
            .query("couponType", 1)
            .json(&serde_json::json!({"cartItemIds": [1, 2]}))
            .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path(), "/api/cart/checkout");
        assert_eq!(request.query, vec![("couponType".to_string(), "1".to_string())]);
        assert!(matches!(request.body, RequestBody::Json(_)));
    }

    #[test]
    fn test_response_into_data() {
        let response = ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: br#"{"code":"200","msg":null,"data":[1,2,3]}"#.to_vec(),
        };
        assert_eq!(response.text(), r#"{"code":"200","msg":null,"data":[1,2,3]}"#);
        let data: Vec<i32> = response.into_data().unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }
}
