//! Product catalog supplier.
//!
//! DESIGN
//! ======
//! Resolvers depend on the `CatalogSupplier` trait, never on a concrete
//! source. The only shipped implementation is `MockCatalog`, an in-memory
//! list that sleeps for a configured latency and can be told to fail a
//! fraction of fetches so the fail-open path is exercised outside tests.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    pub image_url: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of the items a resolver hands to a view.
#[async_trait::async_trait]
pub trait CatalogSupplier: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Item>, CatalogError>;
}

// =============================================================================
// MOCK CATALOG
// =============================================================================

/// In-memory catalog with simulated latency and failure injection.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    items: Vec<Item>,
    latency: Duration,
    failure_rate: f64,
}

impl MockCatalog {
    #[must_use]
    pub fn new(items: Vec<Item>, latency: Duration, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() { 0.0 } else { failure_rate.clamp(0.0, 1.0) };
        Self { items, latency, failure_rate }
    }

    /// Catalog preloaded with [`seed_items`].
    #[must_use]
    pub fn seeded(latency: Duration, failure_rate: f64) -> Self {
        Self::new(seed_items(), latency, failure_rate)
    }

    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn should_fail(&self) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        if self.failure_rate >= 1.0 {
            return true;
        }
        rand::rng().random_bool(self.failure_rate)
    }
}

#[async_trait::async_trait]
impl CatalogSupplier for MockCatalog {
    async fn fetch_all(&self) -> Result<Vec<Item>, CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.should_fail() {
            return Err(CatalogError::Unavailable("injected failure".into()));
        }
        Ok(self.items.clone())
    }
}

/// The demo product list.
#[must_use]
pub fn seed_items() -> Vec<Item> {
    [
        (1, "Trail Runner", "Lightweight shoe for rough terrain.", 8_999),
        (2, "Canvas Backpack", "20L daypack with a padded laptop sleeve.", 5_450),
        (3, "Steel Bottle", "Insulated, keeps drinks cold for 24 hours.", 2_499),
        (4, "Merino Beanie", "Soft wool hat for cold mornings.", 1_999),
        (5, "Headlamp", "300 lumen rechargeable lamp.", 3_275),
    ]
    .into_iter()
    .map(|(id, name, description, price_cents)| Item {
        id,
        name: name.to_owned(),
        description: description.to_owned(),
        price_cents,
        image_url: Some(format!("/assets/products/{id}.jpg")),
    })
    .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
