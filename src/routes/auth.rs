//! Auth routes — login view, login submit, logout, flag toggle.

use axum::Form;
use axum::extract::{FromRef, FromRequestParts, Query, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::login::{Credentials, LoginError};
use crate::services::redirect::{self, DEFAULT_RETURN_URL};
use crate::state::AppState;

pub(crate) const REMEMBERED_EMAIL_COOKIE: &str = "remembered_email";
const REMEMBER_DAYS: i64 = 30;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Guard for API handlers: rejects with 401 unless the session is signed in.
///
/// Page routes redirect through login instead; see `pages::page`.
pub struct Authenticated;

impl<S> FromRequestParts<S> for Authenticated
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if app_state.auth.is_authenticated() {
            Ok(Self)
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

// =============================================================================
// VIEW MODELS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub return_url: String,
    pub remembered_email: Option<String>,
    pub authenticated: bool,
}

/// Login form body. `remember` is an HTML checkbox: present (`on`) or absent.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    remember: Option<String>,
    #[serde(default, rename = "returnUrl")]
    return_url: Option<String>,
}

impl LoginForm {
    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            remember: self
                .remember
                .as_deref()
                .and_then(crate::config::parse_bool)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /login` — login view carrying the sanitized return URL.
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Json<LoginView> {
    Json(LoginView {
        return_url: redirect::sanitize_return_url(query.return_url.as_deref()),
        remembered_email: jar
            .get(REMEMBERED_EMAIL_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty()),
        authenticated: state.auth.is_authenticated(),
    })
}

/// `POST /login` — validate, sign in, and resume the original navigation.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let credentials = form.credentials();
    let return_url = form.return_url.as_deref().unwrap_or(DEFAULT_RETURN_URL);

    let navigation = match state.navigator.resume(&credentials, return_url).await {
        Ok(navigation) => navigation,
        Err(e) => {
            return (login_error_to_status(&e), Json(serde_json::json!({ "error": e.to_string() }))).into_response();
        }
    };

    let jar = if credentials.remember {
        jar.add(remembered_email_cookie(credentials.normalized_email(), state.config.cookie_secure))
    } else {
        jar.remove(Cookie::build(REMEMBERED_EMAIL_COOKIE).path("/"))
    };

    tracing::info!(path = %navigation.path, trace = ?navigation.trace, "login succeeded; resuming navigation");
    (jar, Redirect::to(&navigation.path)).into_response()
}

/// `POST /logout` — clear the session flag and go home.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.auth.logout();
    Redirect::to(DEFAULT_RETURN_URL)
}

/// `GET /api/auth/me`
pub async fn me(State(state): State<AppState>) -> Json<AuthStatus> {
    Json(AuthStatus { authenticated: state.auth.is_authenticated() })
}

/// `POST /api/auth/toggle` — flip the flag (demo affordance).
pub async fn toggle(State(state): State<AppState>) -> Json<AuthStatus> {
    Json(AuthStatus { authenticated: state.auth.toggle() })
}

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn login_error_to_status(err: &LoginError) -> StatusCode {
    match err {
        LoginError::MissingEmail | LoginError::InvalidEmail | LoginError::PasswordTooShort { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn remembered_email_cookie(email: String, secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBERED_EMAIL_COOKIE, email))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(REMEMBER_DAYS))
        .build()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
