use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use dancehub_core::AppError;
use dancehub_models::{AcademyId, AssignAcademyDto, EventId};

use crate::middleware::auth::{
    CurrentSession, RequireEventsAssignAcademies, RequireRegistrationsReview,
};
use crate::middleware::role::RequireAcademy;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AcademyEventView, RegistrationView};
use super::service;
use super::state_machine::RegistrationAction;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/academies",
    params(
        ("event_id" = EventId, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Registrations of the event", body = Vec<RegistrationView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
pub async fn get_event_registrations(
    State(state): State<AppState>,
    RequireRegistrationsReview(current): RequireRegistrationsReview,
    Path(event_id): Path<EventId>,
) -> Result<Json<Vec<RegistrationView>>, AppError> {
    let registrations = service::event_registrations(&state, &current, event_id).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/academies",
    params(
        ("event_id" = EventId, Path, description = "Event ID")
    ),
    request_body = AssignAcademyDto,
    responses(
        (status = 201, description = "Academy invited", body = RegistrationView),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Invitation already in progress"),
        (status = 422, description = "Validation error")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
pub async fn assign_academy(
    State(state): State<AppState>,
    RequireEventsAssignAcademies(current): RequireEventsAssignAcademies,
    Path(event_id): Path<EventId>,
    ValidatedJson(dto): ValidatedJson<AssignAcademyDto>,
) -> Result<(StatusCode, Json<RegistrationView>), AppError> {
    let view = service::assign_academy(&state, &current, event_id, dto).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/academies/{academy_id}/{action}",
    params(
        ("event_id" = EventId, Path, description = "Event ID"),
        ("academy_id" = AcademyId, Path, description = "Academy ID"),
        ("action" = String, Path, description = "accept, reject, submit, complete, validate or reactivate")
    ),
    responses(
        (status = 200, description = "Re-fetched registration after the transition", body = RegistrationView),
        (status = 400, description = "Unknown action"),
        (status = 403, description = "Role, academy or permission does not allow this action"),
        (status = 409, description = "Transition refused; `reason` says why")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
pub async fn transition_registration(
    State(state): State<AppState>,
    current: CurrentSession,
    Path((event_id, academy_id, action)): Path<(EventId, AcademyId, String)>,
) -> Result<Json<RegistrationView>, AppError> {
    let action: RegistrationAction = action
        .parse()
        .map_err(|msg: String| AppError::bad_request(anyhow!(msg)))?;
    let view = service::perform_transition(&state, &current, event_id, academy_id, action).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/academy/events",
    responses(
        (status = 200, description = "Events the caller's academy is invited to", body = Vec<AcademyEventView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Academies only")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
pub async fn get_academy_events(
    State(state): State<AppState>,
    RequireAcademy(current): RequireAcademy,
) -> Result<Json<Vec<AcademyEventView>>, AppError> {
    let events = service::academy_events(&state, &current).await?;
    Ok(Json(events))
}
