//! Command implementations.
//!
//! Every command builds an [`ApiClient`] backed by the session file, so a
//! login from one invocation is used by the next.
//!
//! # Environment Variables
//!
//! - `TOMATO_MALL_API_URL`, `TOMATO_MALL_LOGIN_PATH`, `TOMATO_MALL_TIMEOUT_SECS`
//!   (see `tomato_mall_client::config`)
//! - `TOMATO_MALL_SESSION_FILE` - Session file (default: `.tomato-mall-session.json`)

pub mod account;
pub mod catalog;
pub mod inbox;
pub mod purchase;
pub mod views;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tomato_mall_client::{
    ApiClient, ApiError, ClientConfig, ClientContext, ConfigError, FileSessionStore, Navigator,
    NavigationError, Session, SessionError,
};
use tracing::{info, warn};

/// Default session file, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = ".tomato-mall-session.json";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Not logged in. Run `tm-cli login <username> --password <password>` first")]
    NotLoggedIn,
}

impl CliError {
    /// Whether the error was already reported through the login redirect.
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_suppressed())
    }
}

/// Navigator for a terminal: there is no login view to open, so it tells
/// the user how to log in again.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<(), NavigationError>> {
        Box::pin(async move {
            warn!(view = path, "Session expired. Log in again with `tm-cli login <username>`");
            Ok(())
        })
    }
}

/// Resolve the session file: explicit flag, then environment, then default.
#[must_use]
pub fn session_file(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("TOMATO_MALL_SESSION_FILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
}

/// Build a client from the environment and the session file.
///
/// # Errors
///
/// Returns `CliError` if configuration is invalid, the session file is
/// unreadable, or the HTTP client cannot be created.
pub fn connect(session_path: &Path) -> Result<ApiClient, CliError> {
    let config = ClientConfig::from_env()?;
    let store = FileSessionStore::open(session_path)?;
    let context = ClientContext::builder()
        .session(Session::new(Arc::new(store)))
        .navigator(Arc::new(TerminalNavigator))
        .build();

    info!(base_url = %config.base_url, "Using TomatoMall API");
    Ok(ApiClient::new(config, context)?)
}

/// The signed-in account id, or `CliError::NotLoggedIn`.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` if no account id is stored.
pub fn require_account(client: &ApiClient) -> Result<tomato_mall_core::AccountId, CliError> {
    client.session().account_id()?.ok_or(CliError::NotLoggedIn)
}
