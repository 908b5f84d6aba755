use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is off.
///
/// - **Log level**: `LOG_LEVEL` (default `info`), overridden wholesale by `RUST_LOG`
/// - **Format**: compact with file and line numbers
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(default_filter());

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    eprintln!("Observability disabled: console logging only");
}

/// `RUST_LOG` when set, else the crate at `LOG_LEVEL` with noisy deps at warn.
pub(crate) fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(filter_directives(&log_level))
    })
}

pub(crate) fn filter_directives(log_level: &str) -> String {
    format!(
        "dancehub={log_level},dancehub_client={log_level},tower_http=warn,hyper=warn,reqwest=warn"
    )
}
