//! Seams to the view layer: navigation and user-facing notices.
//!
//! The HTTP client never renders anything itself. When a session is rejected
//! it asks a [`Notifier`] to show a notice and a [`Navigator`] to move to the
//! login view. The defaults only log.

use futures::future::BoxFuture;
use thiserror::Error;
use tracing::{error, info, warn};

/// Navigation failure reported by a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("navigation to {path} failed: {reason}")]
pub struct NavigationError {
    pub path: String,
    pub reason: String,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Moves the client to another view.
pub trait Navigator: Send + Sync {
    /// Navigate to `path`. Resolves when the navigation has completed.
    fn navigate<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<(), NavigationError>>;
}

/// Shows notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Navigator that only records the target in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<(), NavigationError>> {
        Box::pin(async move {
            info!(path, "Navigating");
            Ok(())
        })
    }
}

/// Notifier that writes notices to the log at a matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(message = %notice.message, "Notice"),
            NoticeLevel::Warning => warn!(message = %notice.message, "Notice"),
            NoticeLevel::Error => error!(message = %notice.message, "Notice"),
        }
    }
}
