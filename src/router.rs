use crate::docs::ApiDoc;
use crate::modules::events::router::init_events_router;
use crate::modules::navigation::router::init_navigation_router;
use crate::modules::permissions::router::{init_permissions_router, init_user_permissions_router};
use crate::modules::registrations::router::{init_academy_router, init_event_registrations_router};
use crate::modules::routes::router::init_routes_router;
use crate::modules::session::router::init_session_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use dancehub_observability::{logging_middleware, metrics_middleware};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .nest(
            "/api",
            Router::new()
                .nest("/session", init_session_router())
                .nest("/navigation", init_navigation_router())
                .nest("/routes", init_routes_router())
                .nest("/permissions", init_permissions_router())
                .nest("/users", init_user_permissions_router())
                .nest(
                    "/events",
                    init_events_router().merge(init_event_registrations_router()),
                )
                .nest("/academy", init_academy_router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
