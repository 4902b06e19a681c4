//! Cart API routes. Both require a signed-in session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::auth::Authenticated;
use crate::services::cart::CartError;
use crate::services::catalog::Item;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: u32,
}

#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<Item>,
    pub total_cents: u64,
}

/// `POST /api/cart/items`
pub async fn add_item(
    _auth: Authenticated,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartSummary>), StatusCode> {
    state
        .cart
        .add(body.product_id)
        .map_err(cart_error_to_status)?;
    Ok((StatusCode::CREATED, Json(summary(&state))))
}

/// `DELETE /api/cart/items/{id}`
pub async fn remove_item(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<CartSummary>, StatusCode> {
    state.cart.remove(id).map_err(cart_error_to_status)?;
    Ok(Json(summary(&state)))
}

fn summary(state: &AppState) -> CartSummary {
    CartSummary { items: state.cart.list(), total_cents: state.cart.total_cents() }
}

pub(crate) fn cart_error_to_status(err: CartError) -> StatusCode {
    tracing::debug!(error = %err, "cart request rejected");
    match err {
        CartError::UnknownProduct(_) | CartError::NotInCart(_) => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
