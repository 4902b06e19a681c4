//! Route data resolver.
//!
//! DESIGN
//! ======
//! A resolver runs after the guard allows a navigation and before the view
//! is built. It calls its supplier under a timeout and folds every failure
//! (supplier error or timeout) into an empty, well-formed `ResolvedData`.
//! Navigation therefore always completes once the guard allows it.
//!
//! TRADE-OFFS
//! ==========
//! Views cannot tell "catalog is empty" from "catalog is down" by payload
//! alone, so `ResolvedData` carries a `failed` flag a view may render as a
//! banner.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::services::catalog::{CatalogError, CatalogSupplier, Item};

/// Data handed to a view. `failed` implies an empty payload; the fields are
/// private so that invariant holds for every value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedData {
    payload: Vec<Item>,
    failed: bool,
}

impl ResolvedData {
    #[must_use]
    pub fn loaded(payload: Vec<Item>) -> Self {
        Self { payload, failed: false }
    }

    #[must_use]
    pub fn empty_failed() -> Self {
        Self { payload: Vec::new(), failed: true }
    }

    /// Empty result for routes that need no data.
    #[must_use]
    pub fn none() -> Self {
        Self::loaded(Vec::new())
    }

    #[must_use]
    pub fn payload(&self) -> &[Item] {
        &self.payload
    }

    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed
    }

    #[must_use]
    pub fn into_payload(self) -> Vec<Item> {
        self.payload
    }
}

/// Resolver bound to one supplier.
#[derive(Clone)]
pub struct DataResolver {
    supplier: Arc<dyn CatalogSupplier>,
    timeout: Duration,
}

impl DataResolver {
    #[must_use]
    pub fn new(supplier: Arc<dyn CatalogSupplier>, timeout: Duration) -> Self {
        Self { supplier, timeout }
    }

    /// Fetch the data `route_key` needs. Never fails.
    pub async fn resolve(&self, route_key: &str) -> ResolvedData {
        match self.fetch().await {
            Ok(items) => {
                tracing::debug!(route = route_key, count = items.len(), "route data resolved");
                ResolvedData::loaded(items)
            }
            Err(e) => {
                tracing::warn!(route = route_key, error = %e, "route data fetch failed; rendering empty");
                ResolvedData::empty_failed()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Item>, CatalogError> {
        tokio::time::timeout(self.timeout, self.supplier.fetch_all())
            .await
            .map_err(|_| CatalogError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
