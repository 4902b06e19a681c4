//! Storefront domain services.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the navigation pipeline (auth flag, guard, resolver,
//! return-URL handling) and the in-memory data sources it resolves from, so
//! route handlers stay focused on HTTP translation.

pub mod auth_state;
pub mod cart;
pub mod catalog;
pub mod guard;
pub mod login;
pub mod navigation;
pub mod redirect;
pub mod resolver;
