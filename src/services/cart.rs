//! In-memory shopping cart.
//!
//! The cart is the data source behind `/cart`: it implements
//! `CatalogSupplier`, so the cart route resolves through the same
//! fail-open resolver as the product list.

use std::sync::{Arc, Mutex, PoisonError};

use crate::services::catalog::{CatalogError, CatalogSupplier, Item, MockCatalog};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("unknown product: {0}")]
    UnknownProduct(u32),
    #[error("product not in cart: {0}")]
    NotInCart(u32),
}

/// Cart contents shared across handlers. Items keep insertion order and may
/// repeat.
#[derive(Clone)]
pub struct CartStore {
    catalog: Arc<MockCatalog>,
    items: Arc<Mutex<Vec<Item>>>,
}

impl CartStore {
    #[must_use]
    pub fn new(catalog: Arc<MockCatalog>) -> Self {
        Self { catalog, items: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Add one unit of `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if the catalog has no such item.
    pub fn add(&self, product_id: u32) -> Result<Item, CartError> {
        let item = self
            .catalog
            .find(product_id)
            .cloned()
            .ok_or(CartError::UnknownProduct(product_id))?;
        self.lock().push(item.clone());
        Ok(item)
    }

    /// Remove the most recently added unit of `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if no unit is present.
    pub fn remove(&self, product_id: u32) -> Result<(), CartError> {
        let mut items = self.lock();
        let idx = items
            .iter()
            .rposition(|item| item.id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        items.remove(idx);
        Ok(())
    }

    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.lock().clone()
    }

    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.lock().iter().map(|item| item.price_cents).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl CatalogSupplier for CartStore {
    async fn fetch_all(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.list())
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
