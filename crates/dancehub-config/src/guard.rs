//! Route guard configuration.
//!
//! When a signed-in user opens a route they may not see, the guard either
//! renders an access-denied view or silently redirects to a fallback page.
//!
//! - `GUARD_SHOW_ACCESS_DENIED`: `true` renders the access-denied view (default: true)
//! - `GUARD_FALLBACK_PATH`: Redirect target when the view is disabled (default: `/dashboard`)
//! - `GUARD_LOGIN_PATH`: Where unauthenticated users are sent (default: `/login`)

use crate::env::{flag_or, process_env, string_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    pub show_access_denied: bool,
    pub fallback_path: String,
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            show_access_denied: true,
            fallback_path: "/dashboard".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

impl GuardConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            show_access_denied: flag_or(
                &lookup,
                "GUARD_SHOW_ACCESS_DENIED",
                defaults.show_access_denied,
            ),
            fallback_path: string_or(&lookup, "GUARD_FALLBACK_PATH", &defaults.fallback_path),
            login_path: string_or(&lookup, "GUARD_LOGIN_PATH", &defaults.login_path),
        }
    }
}
