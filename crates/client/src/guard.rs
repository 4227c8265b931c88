//! Single-flight guard for the redirect-to-login navigation.
//!
//! The guard has two states. The first caller to observe a rejected session
//! while the guard is [`GuardState::Idle`] wins a [`RedirectTicket`] and
//! performs the redirect; every other caller gets `None` until that ticket is
//! dropped. Dropping the ticket (navigation finished, failed, or the owning
//! task was cancelled) returns the guard to idle.
//!
//! Tickets own an `Arc` of their guard so they can be moved into the task
//! that performs the navigation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Observable guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No redirect in flight.
    Idle,
    /// A redirect navigation is in flight.
    Redirecting,
}

/// At-most-one-redirect latch.
#[derive(Debug, Default)]
pub struct RedirectGuard {
    redirecting: AtomicBool,
}

impl RedirectGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            redirecting: AtomicBool::new(false),
        }
    }

    /// Try to move from idle to redirecting.
    ///
    /// Returns the ticket if this caller won the transition.
    #[must_use]
    pub fn try_begin(self: &Arc<Self>) -> Option<RedirectTicket> {
        self.redirecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RedirectTicket {
                guard: Arc::clone(self),
            })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        if self.redirecting.load(Ordering::Acquire) {
            GuardState::Redirecting
        } else {
            GuardState::Idle
        }
    }

    /// Whether a redirect is in flight.
    #[must_use]
    pub fn is_redirecting(&self) -> bool {
        self.state() == GuardState::Redirecting
    }
}

/// Proof of owning the in-flight redirect. Releases the guard on drop.
#[derive(Debug)]
#[must_use = "dropping the ticket immediately ends the redirect"]
pub struct RedirectTicket {
    guard: Arc<RedirectGuard>,
}

impl Drop for RedirectTicket {
    fn drop(&mut self) {
        self.guard.redirecting.store(false, Ordering::Release);
    }
}
