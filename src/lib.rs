//! Storefront navigation-authorization service.
//!
//! Page navigations pass a session guard, resolve their data with a
//! fail-open-to-empty resolver, and detour through login carrying a return
//! URL when the session is signed out.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
