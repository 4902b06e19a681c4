//! Navigation guard: allow a route transition or send it through login.
//!
//! The guard is a total, pure function of the request. It never reads
//! `AuthState` itself; the caller snapshots the flag into the request so a
//! navigation evaluates against one consistent value.

use std::collections::BTreeMap;

pub const LOGIN_PATH: &str = "/login";
pub const RETURN_URL_PARAM: &str = "returnUrl";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationRequestError {
    #[error("navigation target path is empty")]
    EmptyTarget,
}

/// An attempted route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    target_path: String,
    current_auth_state: bool,
}

impl NavigationRequest {
    /// # Errors
    ///
    /// Returns [`NavigationRequestError::EmptyTarget`] for an empty path.
    pub fn new(target_path: impl Into<String>, current_auth_state: bool) -> Result<Self, NavigationRequestError> {
        let target_path = target_path.into();
        if target_path.is_empty() {
            return Err(NavigationRequestError::EmptyTarget);
        }
        Ok(Self { target_path, current_auth_state })
    }

    #[must_use]
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    #[must_use]
    pub fn current_auth_state(&self) -> bool {
        self.current_auth_state
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo { path: String, params: BTreeMap<String, String> },
}

impl GuardDecision {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target rendered as a URL with its params query-encoded.
    ///
    /// `None` for [`GuardDecision::Allow`].
    #[must_use]
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectTo { path, params } if params.is_empty() => Some(path.clone()),
            Self::RedirectTo { path, params } => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params.iter())
                    .finish();
                Some(format!("{path}?{query}"))
            }
        }
    }
}

/// Decide whether `request` may proceed.
#[must_use]
pub fn evaluate(request: &NavigationRequest) -> GuardDecision {
    if request.current_auth_state {
        return GuardDecision::Allow;
    }
    let mut params = BTreeMap::new();
    params.insert(RETURN_URL_PARAM.to_owned(), request.target_path.clone());
    GuardDecision::RedirectTo { path: LOGIN_PATH.to_owned(), params }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
