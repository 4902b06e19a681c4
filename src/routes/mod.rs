//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page routes (`/home`, `/products`, `/cart`) run through the navigator so
//! the guard, resolver and login detour behave the same for every page.
//! Login, logout and the small JSON API live beside them on one Axum router.

pub mod auth;
pub mod cart;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full storefront router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(redirect_root_to_home))
        .route("/home", get(pages::page))
        .route("/products", get(pages::page))
        .route("/cart", get(pages::page))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/toggle", post(auth::toggle))
        .route("/api/cart/items", post(cart::add_item))
        .route("/api/cart/items/{id}", delete(cart::remove_item))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root_to_home() -> Redirect {
    Redirect::permanent("/home")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
