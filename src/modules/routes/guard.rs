//! Route guard.
//!
//! Evaluated in order, first match wins:
//!
//! 1. session still loading: [`GuardDecision::Loading`]
//! 2. no user: [`GuardDecision::RedirectToLogin`] keeping the attempted location
//! 3. role requirement unmet (admins pass): denied
//! 4. permission requirement unmet (admins pass): denied
//! 5. otherwise [`GuardDecision::Render`]
//!
//! A denial renders the access-denied view or redirects to the fallback path,
//! depending on [`GuardConfig::show_access_denied`].

use dancehub_auth::SessionState;
use dancehub_config::GuardConfig;
use serde::Serialize;
use utoipa::ToSchema;

use super::model::RouteDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Loading,
    #[serde(rename_all = "camelCase")]
    RedirectToLogin { to: String, return_to: String },
    AccessDenied,
    Redirect { to: String },
    Render,
}

impl GuardDecision {
    pub fn outcome(&self) -> &'static str {
        match self {
            GuardDecision::Loading => "loading",
            GuardDecision::RedirectToLogin { .. } => "login",
            GuardDecision::AccessDenied => "denied",
            GuardDecision::Redirect { .. } => "redirect",
            GuardDecision::Render => "render",
        }
    }
}

fn deny(config: &GuardConfig) -> GuardDecision {
    if config.show_access_denied {
        GuardDecision::AccessDenied
    } else {
        GuardDecision::Redirect {
            to: config.fallback_path.clone(),
        }
    }
}

/// Decides what the SPA shows for `location` (path plus query string).
pub fn evaluate_route(
    state: &SessionState,
    route: &RouteDefinition,
    location: &str,
    config: &GuardConfig,
) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Loading;
    }
    if !state.is_authenticated() {
        return GuardDecision::RedirectToLogin {
            to: config.login_path.clone(),
            return_to: location.to_string(),
        };
    }

    let evaluator = state.evaluator();
    if !route.access.route_role_allows(&evaluator) {
        return deny(config);
    }
    if !route
        .access
        .route_permission_allows(&evaluator, route.require_all)
    {
        return deny(config);
    }

    GuardDecision::Render
}
