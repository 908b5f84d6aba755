use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_route_access;

pub fn init_routes_router() -> Router<AppState> {
    Router::new().route("/access", get(get_route_access))
}
