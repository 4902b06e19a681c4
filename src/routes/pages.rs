//! Page routes driven by the navigator.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::services::catalog::Item;
use crate::services::navigation::NavigationOutcome;
use crate::state::AppState;

/// JSON view model for a rendered page.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub path: String,
    pub items: Vec<Item>,
    /// The page's data could not be fetched; `items` is empty.
    pub failed: bool,
    /// Auth as the guard saw it, not as it stands when the data arrives.
    pub authenticated: bool,
}

/// `GET /home`, `/products`, `/cart` — guard, resolve, render.
pub async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), ToString::to_string);
    let navigation = state.navigator.navigate(&target).await;
    outcome_to_response(navigation.outcome, navigation.authenticated)
}

pub(crate) fn outcome_to_response(outcome: NavigationOutcome, authenticated: bool) -> Response {
    match outcome {
        NavigationOutcome::Rendered { path, data } => {
            let failed = data.failed();
            Json(PageView { path, items: data.into_payload(), failed, authenticated }).into_response()
        }
        NavigationOutcome::RedirectedToLogin { location, .. } => Redirect::temporary(&location).into_response(),
        NavigationOutcome::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
        NavigationOutcome::Superseded { .. } => (StatusCode::CONFLICT, "navigation superseded").into_response(),
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
