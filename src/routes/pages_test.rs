use std::sync::Arc;
use std::time::Duration;

use axum::http::header::LOCATION;
use http_body_util::BodyExt;

use super::*;
use crate::config::StorefrontConfig;
use crate::services::catalog::MockCatalog;
use crate::services::resolver::ResolvedData;
use crate::state::test_helpers;

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// outcome_to_response
// =============================================================================

#[test]
fn rendered_maps_to_ok() {
    let outcome = NavigationOutcome::Rendered { path: "/home".into(), data: ResolvedData::none() };
    assert_eq!(outcome_to_response(outcome, false).status(), StatusCode::OK);
}

#[test]
fn redirect_maps_to_temporary_redirect_with_location() {
    let outcome = NavigationOutcome::RedirectedToLogin {
        location: "/login?returnUrl=%2Fcart".into(),
        return_url: "/cart".into(),
    };
    let resp = outcome_to_response(outcome, false);
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login?returnUrl=%2Fcart");
}

#[test]
fn not_found_maps_to_404() {
    let outcome = NavigationOutcome::NotFound { path: "/x".into() };
    assert_eq!(outcome_to_response(outcome, true).status(), StatusCode::NOT_FOUND);
}

#[test]
fn superseded_maps_to_conflict() {
    let outcome = NavigationOutcome::Superseded { path: "/products".into() };
    assert_eq!(outcome_to_response(outcome, true).status(), StatusCode::CONFLICT);
}

// =============================================================================
// page handler
// =============================================================================

#[tokio::test]
async fn products_redirects_when_logged_out() {
    let state = test_helpers::test_app_state();
    let resp = page(State(state), Uri::from_static("/products")).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login?returnUrl=%2Fproducts");
}

#[tokio::test]
async fn query_string_survives_the_detour() {
    let state = test_helpers::test_app_state();
    let resp = page(State(state), Uri::from_static("/products?page=2")).await;
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login?returnUrl=%2Fproducts%3Fpage%3D2");
}

#[tokio::test]
async fn products_render_when_logged_in() {
    let state = test_helpers::test_app_state();
    state.auth.login();
    let resp = page(State(state), Uri::from_static("/products")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn home_is_public() {
    let state = test_helpers::test_app_state();
    let resp = page(State(state), Uri::from_static("/home")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn catalog_failure_still_renders() {
    let state = test_helpers::failing_app_state();
    state.auth.login();
    let resp = page(State(state), Uri::from_static("/products")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn logout_mid_resolve_keeps_guard_reading() {
    let catalog = Arc::new(MockCatalog::seeded(Duration::from_millis(300), 0.0));
    let state = AppState::with_catalog(StorefrontConfig::default(), catalog);
    state.auth.login();

    let pending = tokio::spawn(page(State(state.clone()), Uri::from_static("/products")));
    tokio::time::sleep(Duration::from_millis(100)).await;
    state.auth.logout();

    let resp = pending.await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let view = body_json(resp).await;
    assert_eq!(view["authenticated"], true);
    assert_eq!(view["items"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn rendered_page_reports_auth_state() {
    let state = test_helpers::test_app_state();
    let view = body_json(page(State(state), Uri::from_static("/home")).await).await;
    assert_eq!(view["authenticated"], false);
    assert_eq!(view["failed"], false);
}
