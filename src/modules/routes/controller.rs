use axum::{
    Json,
    extract::{Query, State},
};
use dancehub_auth::AccessRequirement;
use dancehub_observability::track_guard_decision;

use crate::middleware::auth::MaybeSession;
use crate::state::AppState;

use super::guard::evaluate_route;
use super::model::{RouteAccessQuery, RouteAccessResponse, RouteDefinition};

#[utoipa::path(
    get,
    path = "/api/routes/access",
    params(RouteAccessQuery),
    responses(
        (status = 200, description = "Guard decision for the attempted location", body = RouteAccessResponse)
    ),
    tag = "Routes",
    security((), ("bearer_auth" = []))
)]
pub async fn get_route_access(
    State(state): State<AppState>,
    MaybeSession(session_state): MaybeSession,
    Query(query): Query<RouteAccessQuery>,
) -> Json<RouteAccessResponse> {
    let matched = state.routes.find(&query.path);
    let open = RouteDefinition::new(&query.path, AccessRequirement::open());
    let route = matched.unwrap_or(&open);

    let decision = evaluate_route(&session_state, route, &query.path, &state.guard_config);
    track_guard_decision(decision.outcome());
    tracing::debug!(path = %query.path, outcome = decision.outcome(), "Route access evaluated");

    Json(RouteAccessResponse {
        path: query.path.clone(),
        route: matched.map(|r| r.pattern.clone()),
        decision,
    })
}
