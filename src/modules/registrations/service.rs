use chrono::Utc;
use dancehub_client::{BearerToken, SubmissionPermit};
use dancehub_core::AppError;
use dancehub_core::permissions as p;
use dancehub_models::{AcademyId, AssignAcademyDto, EventId};
use dancehub_observability::track_registration_transition;
use tracing::instrument;

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

use super::model::{AcademyEventView, RegistrationView};
use super::state_machine::{Actor, RegistrationAction, TransitionError, apply};

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::conflict(err.to_string()).with_reason(err.reason.as_str())
    }
}

fn claim(
    state: &AppState,
    event_id: EventId,
    academy_id: AcademyId,
) -> Result<SubmissionPermit, AppError> {
    state
        .gate
        .try_acquire(format!("registration:{event_id}:{academy_id}"))
        .ok_or_else(|| {
            AppError::conflict("A change to this registration is already in progress".to_string())
                .with_reason("in_flight")
        })
}

fn actor_for(current: &CurrentSession) -> Result<Actor, AppError> {
    Actor::from_role(current.session.role()).ok_or_else(|| {
        AppError::forbidden(format!(
            "Role {} cannot act on registrations",
            current.session.role()
        ))
    })
}

/// Academies only act on their own registrations.
fn ensure_owner(
    current: &CurrentSession,
    actor: Actor,
    academy_id: AcademyId,
) -> Result<(), AppError> {
    if actor == Actor::Academy && current.user().academy_id() != Some(academy_id) {
        return Err(AppError::forbidden(
            "You can only act on your own academy's registrations".to_string(),
        ));
    }
    Ok(())
}

/// Academies need `registrations.manage`, admins `registrations.review`.
fn ensure_permitted(current: &CurrentSession, actor: Actor) -> Result<(), AppError> {
    let code = match actor {
        Actor::Academy => p::REGISTRATIONS_MANAGE,
        Actor::Admin => p::REGISTRATIONS_REVIEW,
    };
    if !current.session.evaluator().has_permission(code) {
        return Err(AppError::forbidden(format!(
            "Access denied. Missing required permission: {code}"
        )));
    }
    Ok(())
}

#[instrument(skip(state, current))]
pub async fn event_registrations(
    state: &AppState,
    current: &CurrentSession,
    event_id: EventId,
) -> Result<Vec<RegistrationView>, AppError> {
    let token = &current.token;
    let (event, registrations) = tokio::try_join!(
        state.backend.get_event(token, event_id),
        state.backend.get_event_academies(token, event_id),
    )?;

    let actor = Actor::from_role(current.session.role());
    let now = Utc::now();
    Ok(registrations
        .into_iter()
        .map(|registration| RegistrationView::build(registration, &event, actor, now))
        .collect())
}

#[instrument(skip(state, current, dto), fields(academy_id = %dto.academy_id))]
pub async fn assign_academy(
    state: &AppState,
    current: &CurrentSession,
    event_id: EventId,
    dto: AssignAcademyDto,
) -> Result<RegistrationView, AppError> {
    let _permit = claim(state, event_id, dto.academy_id)?;
    let token = &current.token;

    let event = state.backend.get_event(token, event_id).await?;
    let registration = state
        .backend
        .assign_academy_to_event(token, event_id, &dto)
        .await?;

    tracing::info!(event_id = %event_id, academy_id = %dto.academy_id, "Academy invited");
    Ok(RegistrationView::build(
        registration,
        &event,
        Actor::from_role(current.session.role()),
        Utc::now(),
    ))
}

#[instrument(skip(state, current))]
pub async fn academy_events(
    state: &AppState,
    current: &CurrentSession,
) -> Result<Vec<AcademyEventView>, AppError> {
    let academy_id = current.user().academy_id().ok_or_else(|| {
        AppError::forbidden("No academy is linked to this account".to_string())
    })?;

    let entries = state
        .backend
        .get_academy_events(&current.token, academy_id)
        .await?;

    let now = Utc::now();
    Ok(entries
        .into_iter()
        .map(|entry| AcademyEventView::build(entry.event, entry.registration, now))
        .collect())
}

/// Validates `action` locally, forwards it, and returns the re-fetched
/// registration. Nothing is forwarded when the local check refuses.
#[instrument(skip(state, current), fields(action = %action))]
pub async fn perform_transition(
    state: &AppState,
    current: &CurrentSession,
    event_id: EventId,
    academy_id: AcademyId,
    action: RegistrationAction,
) -> Result<RegistrationView, AppError> {
    let actor = actor_for(current)?;
    ensure_owner(current, actor, academy_id)?;
    ensure_permitted(current, actor)?;
    let _permit = claim(state, event_id, academy_id)?;

    let token = &current.token;
    let (event, registration) = tokio::try_join!(
        state.backend.get_event(token, event_id),
        state.backend.get_event_academy(token, event_id, academy_id),
    )?;

    let target = match apply(action, &registration, &event, actor, Utc::now()) {
        Ok(target) => target,
        Err(err) => {
            tracing::info!(reason = %err.reason.as_str(), from = %err.from, "Transition refused");
            track_registration_transition(action.as_str(), "refused");
            return Err(err.into());
        }
    };

    if let Err(err) = forward(state, token, event_id, academy_id, action).await {
        track_registration_transition(action.as_str(), "failed");
        return Err(err);
    }
    track_registration_transition(action.as_str(), "forwarded");
    tracing::info!(
        event_id = %event_id,
        academy_id = %academy_id,
        from = %registration.status,
        to = %target,
        "Registration transition forwarded"
    );

    let (event, refreshed) = tokio::try_join!(
        state.backend.get_event(token, event_id),
        state.backend.get_event_academy(token, event_id, academy_id),
    )?;
    Ok(RegistrationView::build(
        refreshed,
        &event,
        Some(actor),
        Utc::now(),
    ))
}

async fn forward(
    state: &AppState,
    token: &BearerToken,
    event_id: EventId,
    academy_id: AcademyId,
    action: RegistrationAction,
) -> Result<(), AppError> {
    let backend = &state.backend;
    match action {
        RegistrationAction::Accept => {
            backend
                .respond_to_invitation(token, event_id, academy_id, true)
                .await?
        }
        RegistrationAction::Reject => {
            backend
                .respond_to_invitation(token, event_id, academy_id, false)
                .await?
        }
        RegistrationAction::Submit => {
            backend
                .submit_registration(token, event_id, academy_id)
                .await?
        }
        RegistrationAction::Complete
        | RegistrationAction::Validate
        | RegistrationAction::Reactivate => {
            backend
                .update_event_academy_status(token, event_id, academy_id, action.target())
                .await?
        }
    }
    Ok(())
}
