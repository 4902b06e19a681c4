//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It owns the single `AuthState`, the navigator with its route table, and
//! the in-memory catalog and cart. Every field is `Arc`-backed so cloning
//! per request is cheap.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::auth_state::AuthState;
use crate::services::cart::CartStore;
use crate::services::catalog::MockCatalog;
use crate::services::navigation::{Navigator, RouteSpec, RouteTable};
use crate::services::resolver::DataResolver;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub navigator: Arc<Navigator>,
    pub catalog: Arc<MockCatalog>,
    pub cart: CartStore,
    pub config: Arc<StorefrontConfig>,
}

impl AppState {
    /// Build state around the seeded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Arc::new(MockCatalog::seeded(config.catalog_latency, config.catalog_failure_rate));
        Self::with_catalog(config, catalog)
    }

    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Arc<MockCatalog>) -> Self {
        let auth = AuthState::new();
        let cart = CartStore::new(Arc::clone(&catalog));

        let routes = RouteTable::new()
            .with("/home", RouteSpec::public())
            .with(
                "/products",
                RouteSpec::guarded(Some(DataResolver::new(catalog.clone(), config.resolve_timeout))),
            )
            .with(
                "/cart",
                RouteSpec::guarded(Some(DataResolver::new(Arc::new(cart.clone()), config.resolve_timeout))),
            );
        let navigator = Arc::new(Navigator::new(auth.clone(), routes, config.min_password_len));

        Self { auth, navigator, catalog, cart, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
