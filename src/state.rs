use std::sync::Arc;

use dancehub_auth::RolePermissionSet;
use dancehub_client::{Backend, HttpBackend, SubmissionGate};
use dancehub_config::{BackendConfig, CorsConfig, GuardConfig};

use crate::modules::navigation::catalog::dashboard_navigation;
use crate::modules::navigation::model::NavNode;
use crate::modules::routes::table::RouteTable;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub role_sets: Arc<RolePermissionSet>,
    pub navigation: Arc<Vec<NavNode>>,
    pub routes: Arc<RouteTable>,
    pub guard_config: GuardConfig,
    pub cors_config: CorsConfig,
    pub gate: SubmissionGate,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn Backend>,
        guard_config: GuardConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            backend,
            role_sets: Arc::new(RolePermissionSet::builtin()),
            navigation: Arc::new(dashboard_navigation()),
            routes: Arc::new(RouteTable::dashboard()),
            guard_config,
            cors_config,
            gate: SubmissionGate::new(),
        }
    }
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    let backend_config = BackendConfig::from_env();
    tracing::info!(
        base_url = %backend_config.base_url,
        timeout_secs = backend_config.timeout_secs,
        "Using REST backend"
    );
    let backend = HttpBackend::new(&backend_config)?;

    Ok(AppState::new(
        Arc::new(backend),
        GuardConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
