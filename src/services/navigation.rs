//! Navigation pipeline: guard, resolve, and the login detour.
//!
//! ARCHITECTURE
//! ============
//! A navigation walks one of two paths through the state machine:
//!
//! ```text
//! Evaluating -> Allowed -> Resolving -> Rendered
//! Evaluating -> Denied -> RedirectedToLogin -> AwaitingCredentials
//!            -> Authenticated -> ResumingOriginal -> (Evaluating ...) -> Rendered
//! ```
//!
//! A denied navigation stops at `AwaitingCredentials`; only an explicit
//! login moves it on. Nothing is retried automatically.
//!
//! CONCURRENCY
//! ===========
//! Each navigation snapshots `AuthState` once, at `Evaluating`, and carries
//! that reading to the caller. A navigation that matches a route takes a
//! number from a monotonic generation counter; unknown paths never take one,
//! so a 404 does not supersede anything. After the resolver returns, a
//! navigation that is no longer the newest discards its data and reports
//! `Superseded` (last navigation wins).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::services::auth_state::AuthState;
use crate::services::guard::{self, GuardDecision, NavigationRequest};
use crate::services::login::{Credentials, LoginError};
use crate::services::redirect::{self, NavigationCommand};
use crate::services::resolver::{DataResolver, ResolvedData};

// =============================================================================
// ROUTES
// =============================================================================

/// One navigable page.
#[derive(Clone)]
pub struct RouteSpec {
    /// Whether the guard runs before this route.
    pub guarded: bool,
    /// Data to fetch before rendering, if any.
    pub resolver: Option<DataResolver>,
}

impl RouteSpec {
    #[must_use]
    pub fn public() -> Self {
        Self { guarded: false, resolver: None }
    }

    #[must_use]
    pub fn guarded(resolver: Option<DataResolver>) -> Self {
        Self { guarded: true, resolver }
    }
}

/// Path to route lookup. Query strings and fragments are ignored when
/// matching, and a trailing slash is tolerated.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteSpec>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: &str, spec: RouteSpec) -> Self {
        self.routes.insert(normalize_path(path).to_owned(), spec);
        self
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RouteSpec> {
        self.routes.get(normalize_path(path))
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Resolver key for a path: its first segment, or `home` for the root.
#[must_use]
pub fn route_key(path: &str) -> &str {
    normalize_path(path)
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("home")
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationState {
    Evaluating,
    Allowed,
    Resolving,
    Rendered,
    Denied,
    RedirectedToLogin,
    AwaitingCredentials,
    Authenticated,
    ResumingOriginal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Rendered { path: String, data: ResolvedData },
    RedirectedToLogin { location: String, return_url: String },
    NotFound { path: String },
    Superseded { path: String },
}

/// Result of one navigation attempt.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub id: Uuid,
    /// Target as requested, query string included.
    pub path: String,
    /// The auth reading taken at `Evaluating`.
    pub authenticated: bool,
    /// States visited, in order.
    pub trace: Vec<NavigationState>,
    pub outcome: NavigationOutcome,
}

// =============================================================================
// NAVIGATOR
// =============================================================================

pub struct Navigator {
    auth: AuthState,
    routes: RouteTable,
    generation: AtomicU64,
    min_password_len: usize,
}

impl Navigator {
    #[must_use]
    pub fn new(auth: AuthState, routes: RouteTable, min_password_len: usize) -> Self {
        Self { auth, routes, generation: AtomicU64::new(0), min_password_len }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Run the pipeline for `path`.
    pub async fn navigate(&self, path: &str) -> Navigation {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", %id, path);
        let run = self.run(path, Vec::new()).instrument(span).await;
        run.into_navigation(id, path)
    }

    /// Sign in and produce the command that resumes the original navigation.
    ///
    /// # Errors
    ///
    /// Returns the [`LoginError`] for invalid credentials; `AuthState` is left
    /// untouched in that case.
    pub fn complete_login(&self, credentials: &Credentials, return_url: &str) -> Result<NavigationCommand, LoginError> {
        if let Err(e) = credentials.validate(self.min_password_len) {
            tracing::info!(error = %e, "login rejected");
            return Err(e);
        }
        self.auth.login();
        Ok(redirect::resume_after_login(return_url))
    }

    /// `complete_login` followed by the resumed navigation, with the full
    /// state trace from `Authenticated` onwards. Backs `POST /login`.
    ///
    /// # Errors
    ///
    /// Same as [`Navigator::complete_login`].
    pub async fn resume(&self, credentials: &Credentials, return_url: &str) -> Result<Navigation, LoginError> {
        let command = self.complete_login(credentials, return_url)?;
        let id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", %id, path = %command.path);
        let prefix = vec![NavigationState::Authenticated, NavigationState::ResumingOriginal];
        let run = self.run(&command.path, prefix).instrument(span).await;
        Ok(run.into_navigation(id, &command.path))
    }

    async fn run(&self, path: &str, mut trace: Vec<NavigationState>) -> Run {
        trace.push(NavigationState::Evaluating);
        let authenticated = self.auth.snapshot();
        let finish = move |trace: Vec<NavigationState>, outcome: NavigationOutcome| Run { trace, outcome, authenticated };

        let Ok(request) = NavigationRequest::new(path, authenticated) else {
            return finish(trace, NavigationOutcome::NotFound { path: path.to_owned() });
        };
        let Some(route) = self.routes.get(path) else {
            tracing::debug!("no such route");
            return finish(trace, NavigationOutcome::NotFound { path: path.to_owned() });
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if route.guarded {
            let decision = guard::evaluate(&request);
            if let GuardDecision::RedirectTo { .. } = decision {
                trace.push(NavigationState::Denied);
                let return_url = redirect::capture_return_url(&decision);
                let location = decision.location().unwrap_or_else(|| guard::LOGIN_PATH.to_owned());
                trace.push(NavigationState::RedirectedToLogin);
                trace.push(NavigationState::AwaitingCredentials);
                tracing::info!(%location, "navigation denied; redirecting to login");
                return finish(trace, NavigationOutcome::RedirectedToLogin { location, return_url });
            }
        }
        trace.push(NavigationState::Allowed);

        let data = match &route.resolver {
            Some(resolver) => {
                trace.push(NavigationState::Resolving);
                let data = resolver.resolve(route_key(path)).await;
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::info!("navigation superseded; discarding resolved data");
                    return finish(trace, NavigationOutcome::Superseded { path: path.to_owned() });
                }
                data
            }
            None => ResolvedData::none(),
        };

        trace.push(NavigationState::Rendered);
        tracing::debug!(failed = data.failed(), count = data.payload().len(), "navigation rendered");
        finish(trace, NavigationOutcome::Rendered { path: path.to_owned(), data })
    }
}

struct Run {
    trace: Vec<NavigationState>,
    outcome: NavigationOutcome,
    authenticated: bool,
}

impl Run {
    fn into_navigation(self, id: Uuid, path: &str) -> Navigation {
        Navigation {
            id,
            path: path.to_owned(),
            authenticated: self.authenticated,
            trace: self.trace,
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;
