//! DanceHub observability.
//!
//! Structured logging through `tracing` and Prometheus metrics through
//! `metrics`. The `observability` feature (default) compiles the file
//! appenders and the metrics exporter; without it every entry point is a
//! no-op except plain console logging. At runtime `OBSERVABILITY_ENABLED=false`
//! switches back to console logging only.
//!
//! ```no_run
//! use dancehub_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let _handle = init_metrics();
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

use std::sync::OnceLock;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_middleware, metrics_router, track_guard_decision,
    track_registration_transition,
};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once; anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_enabled(&v))
            .unwrap_or(true)
    })
}

fn parse_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

// No-op stand-ins when the feature is compiled out
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    /// Always `None`; the gateway then skips the `/metrics` route.
    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn metrics_router<S>(_handle: ()) -> axum::Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        axum::Router::new()
    }

    pub fn track_guard_decision(_outcome: &str) {}
    pub fn track_registration_transition(_action: &str, _outcome: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enabled() {
        assert!(parse_enabled("true"));
        assert!(parse_enabled("1"));
        assert!(parse_enabled("yes"));
        assert!(!parse_enabled("false"));
        assert!(!parse_enabled("FALSE"));
        assert!(!parse_enabled(" 0 "));
    }
}
