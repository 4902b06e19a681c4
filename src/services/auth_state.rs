//! Session authentication flag.
//!
//! SYSTEM CONTEXT
//! ==============
//! The storefront has exactly one session and one boolean flag. Guards and
//! resolvers never read a hidden global: they receive an `AuthState` handle
//! through `AppState` and take a snapshot at the start of each navigation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, cheaply clonable authentication flag.
///
/// All clones observe the same flag. Every mutation goes through one atomic,
/// so concurrent handlers never see a torn update.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    authenticated: Arc<AtomicBool>,
}

impl AuthState {
    /// Fresh unauthenticated state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        let previous = self.authenticated.fetch_xor(true, Ordering::SeqCst);
        let current = !previous;
        tracing::info!(authenticated = current, "auth state toggled");
        current
    }

    pub fn login(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
        tracing::info!("session authenticated");
    }

    pub fn logout(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
        tracing::info!("session logged out");
    }

    /// Value a navigation evaluates against for its whole lifetime.
    #[must_use]
    pub fn snapshot(&self) -> bool {
        self.is_authenticated()
    }
}

#[cfg(test)]
#[path = "auth_state_test.rs"]
mod tests;
