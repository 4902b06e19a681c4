//! Return-URL capture and post-login resume.
//!
//! SYSTEM CONTEXT
//! ==============
//! A denied navigation carries its original path through the login detour
//! as the `returnUrl` param. After login the path comes back from the
//! client, so it is untrusted: anything that is not a plain in-app path is
//! replaced by `/home`. Neither operation can fail.

use serde::Serialize;

use crate::services::guard::{GuardDecision, LOGIN_PATH, RETURN_URL_PARAM};

pub const DEFAULT_RETURN_URL: &str = "/home";

/// Instruction for the router to navigate to `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationCommand {
    pub path: String,
}

/// Extract the original destination from a guard decision.
#[must_use]
pub fn capture_return_url(decision: &GuardDecision) -> String {
    let raw = match decision {
        GuardDecision::RedirectTo { params, .. } => params.get(RETURN_URL_PARAM).map(String::as_str),
        GuardDecision::Allow => None,
    };
    sanitize_return_url(raw)
}

/// Navigate back to where the user was headed before logging in.
#[must_use]
pub fn resume_after_login(return_url: &str) -> NavigationCommand {
    let path = sanitize_return_url(Some(return_url));
    if path != return_url {
        tracing::warn!(return_url, fallback = %path, "rejected return url");
    }
    NavigationCommand { path }
}

/// `raw` if it is a safe in-app path, otherwise [`DEFAULT_RETURN_URL`].
#[must_use]
pub fn sanitize_return_url(raw: Option<&str>) -> String {
    match raw {
        Some(url) if is_safe_return_url(url) => url.to_owned(),
        _ => DEFAULT_RETURN_URL.to_owned(),
    }
}

fn is_safe_return_url(url: &str) -> bool {
    if !url.starts_with('/') || url.starts_with("//") || url.starts_with("/\\") {
        return false;
    }
    if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }
    let path = url.split(['?', '#']).next().unwrap_or_default();
    if path.contains("://") {
        return false;
    }
    // Resuming into the login view would loop.
    path.trim_end_matches('/') != LOGIN_PATH
}

#[cfg(test)]
#[path = "redirect_test.rs"]
mod tests;
