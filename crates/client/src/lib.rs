//! Typed client for the TomatoMall REST API.
//!
//! The core is [`ApiClient`]: it attaches the stored session token to every
//! request in a `token` header and turns HTTP 401 into a single, shared
//! redirect to the login view, no matter how many requests fail at once.
//! Per-resource wrappers hang off the client:
//!
//! ```no_run
//! # async fn demo() -> tomato_mall_client::Result<()> {
//! use tomato_mall_client::{ApiClient, ClientConfig, ClientContext};
//!
//! let config = ClientConfig::from_env().map_err(|e| {
//!     tomato_mall_client::ApiError::InvalidRequest(e.to_string())
//! })?;
//! let client = ApiClient::new(config, ClientContext::default())?;
//!
//! for product in client.products().list_products().await? {
//!     println!("{} {}", product.title, product.price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`session`] - Session stores and the typed [`Session`] facade
//! - [`guard`] - Single-flight redirect guard
//! - [`context`] - [`ClientContext`] holding session, guard and view seams
//! - [`http`] - [`ApiClient`] and the response envelope
//! - [`api`] - Per-resource endpoint wrappers
//! - [`routes`] - Client view table and access checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod http;
pub mod login_state;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use context::{ClientContext, ClientContextBuilder};
pub use error::{ApiError, Result};
pub use guard::{GuardState, RedirectGuard};
pub use http::{ApiClient, ApiRequest, ApiResponse};
pub use login_state::LoginState;
pub use navigation::{NavigationError, Navigator, Notice, NoticeLevel, Notifier};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
