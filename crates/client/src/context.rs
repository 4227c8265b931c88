//! Lifecycle-scoped client state.
//!
//! A [`ClientContext`] owns everything that used to be process-global in a
//! browser client: the session store, the redirect guard and the seams to
//! the view layer. Every [`crate::ApiClient`] holds one; tests build their
//! own so nothing leaks between them.

use std::sync::{Arc, OnceLock};

use tracing::{Instrument, debug, info, instrument, warn};

use crate::guard::{GuardState, RedirectGuard};
use crate::navigation::{Navigator, Notice, Notifier, TracingNavigator, TracingNotifier};
use crate::routes::LOGIN_PATH;
use crate::session::Session;

/// Notice shown once per rejected-session redirect.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first";

/// Shared client state. Cheap to clone.
#[derive(Clone)]
pub struct ClientContext {
    inner: Arc<ClientContextInner>,
}

struct ClientContextInner {
    session: Session,
    guard: Arc<RedirectGuard>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    /// Set by the builder, or by the first client built from a
    /// configuration. Unset means `/login`.
    login_path: OnceLock<String>,
}

impl ClientContextInner {
    fn login_path(&self) -> &str {
        self.login_path.get().map_or(LOGIN_PATH, String::as_str)
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("session", &self.inner.session)
            .field("guard", &self.inner.guard.state())
            .field("login_path", &self.inner.login_path())
            .finish_non_exhaustive()
    }
}

impl Default for ClientContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientContext {
    /// Start building a context.
    #[must_use]
    pub fn builder() -> ClientContextBuilder {
        ClientContextBuilder::default()
    }

    /// Typed session accessor.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Redirect guard state.
    #[must_use]
    pub fn guard_state(&self) -> GuardState {
        self.inner.guard.state()
    }

    /// View the client navigates to when the session is rejected.
    #[must_use]
    pub fn login_path(&self) -> &str {
        self.inner.login_path()
    }

    /// Use `path` as the login view unless one was already chosen.
    pub(crate) fn adopt_login_path(&self, path: &str) {
        if self.inner.login_path.set(path.to_string()).is_err() && self.login_path() != path {
            debug!(
                kept = self.login_path(),
                ignored = path,
                "Login path already set on context"
            );
        }
    }

    /// Forward a notice to the view layer.
    pub fn notify(&self, notice: Notice) {
        self.inner.notifier.notify(notice);
    }

    /// React to a rejected session.
    ///
    /// The first caller while idle shows the login notice and starts the
    /// navigation on its own task, then waits for it; concurrent callers
    /// return immediately. The navigation runs to completion even if the
    /// waiting caller is dropped. Returns whether this call started the
    /// redirect.
    #[instrument(skip(self), fields(login_path = %self.login_path()))]
    pub async fn handle_unauthorized(&self) -> bool {
        let Some(ticket) = self.inner.guard.try_begin() else {
            info!("Redirect to login already in flight");
            return false;
        };

        self.inner.notifier.notify(Notice::error(LOGIN_REQUIRED_MESSAGE));

        let inner = Arc::clone(&self.inner);
        let redirect = tokio::spawn(
            async move {
                if let Err(e) = inner.navigator.navigate(inner.login_path()).await {
                    warn!(error = %e, "Login navigation failed");
                }
                drop(ticket);
            }
            .in_current_span(),
        );

        if let Err(e) = redirect.await {
            warn!(error = %e, "Login redirect task did not finish");
        }
        true
    }
}

/// Builder for [`ClientContext`].
#[derive(Default)]
pub struct ClientContextBuilder {
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
    notifier: Option<Arc<dyn Notifier>>,
    login_path: Option<String>,
}

impl ClientContextBuilder {
    /// Use an existing session (defaults to an in-memory one).
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Navigation seam (defaults to [`TracingNavigator`]).
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Notice seam (defaults to [`TracingNotifier`]).
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Login view path. Overrides `ClientConfig::login_path`; without
    /// either it is `/login`.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ClientContext {
        let login_path = OnceLock::new();
        if let Some(path) = self.login_path {
            let _ = login_path.set(path);
        }

        ClientContext {
            inner: Arc::new(ClientContextInner {
                session: self.session.unwrap_or_default(),
                guard: Arc::new(RedirectGuard::new()),
                navigator: self.navigator.unwrap_or_else(|| Arc::new(TracingNavigator)),
                notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
                login_path,
            }),
        }
    }
}
