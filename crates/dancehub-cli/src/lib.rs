//! Reports behind the `dancehub-cli` subcommands.
//!
//! Everything here runs against the built-in role sets and navigation
//! catalog; nothing talks to the backend.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use dancehub::modules::navigation::catalog::dashboard_navigation;
use dancehub::modules::navigation::model::NavNode;
use dancehub::modules::navigation::service::filter_navigation;
use dancehub::modules::registrations::model::RegistrationView;
use dancehub::modules::registrations::state_machine::Actor;
use dancehub::modules::routes::guard::{GuardDecision, evaluate_route};
use dancehub::modules::routes::model::RouteDefinition;
use dancehub::modules::routes::table::RouteTable;
use dancehub_auth::{AccessRequirement, RolePermissionSet, Session, SessionState};
use dancehub_config::GuardConfig;
use dancehub_models::{
    AcademyId, Event, EventAcademyRegistration, EventId, EventStatus, PermissionOverride,
    RegistrationStats, RegistrationStatus, Role, User, UserId,
};
use serde::Serialize;

/// Overrides from `--grant` / `--revoke` flags, grants first.
pub fn overrides_from_flags(grants: &[String], revokes: &[String]) -> Vec<PermissionOverride> {
    grants
        .iter()
        .map(PermissionOverride::grant)
        .chain(revokes.iter().map(PermissionOverride::revoke))
        .collect()
}

pub fn parse_role(value: &str) -> Result<Role> {
    value.parse().with_context(|| format!("Unknown role `{value}`"))
}

fn session_for(role: Role, overrides: &[PermissionOverride]) -> Session {
    let user = User {
        id: UserId::from_u128(1),
        email: format!("{role}@dancehub.local"),
        name: None,
        role,
        permissions: Vec::new(),
        academy_id: None,
        academy: None,
    };
    Session::resolve(user, &RolePermissionSet::builtin(), overrides)
}

#[derive(Debug, Serialize)]
pub struct EffectiveReport {
    pub role: Role,
    pub permissions: BTreeSet<String>,
}

pub fn effective(role: Role, overrides: &[PermissionOverride]) -> EffectiveReport {
    let session = session_for(role, overrides);
    EffectiveReport {
        role,
        permissions: session.effective_permissions().clone(),
    }
}

pub fn menu(role: Role, overrides: &[PermissionOverride]) -> Vec<NavNode> {
    let session = session_for(role, overrides);
    filter_navigation(&dashboard_navigation(), &session.evaluator())
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub path: String,
    pub route: Option<String>,
    pub decision: GuardDecision,
}

/// Guard decision for `path`; `role == None` evaluates an anonymous visitor.
pub fn route(path: &str, role: Option<Role>, overrides: &[PermissionOverride]) -> RouteReport {
    let table = RouteTable::dashboard();
    let matched = table.find(path);
    let open = RouteDefinition::new(path, AccessRequirement::open());

    let state = match role {
        Some(role) => SessionState::Authenticated(session_for(role, overrides)),
        None => SessionState::Anonymous,
    };
    let decision = evaluate_route(
        &state,
        matched.unwrap_or(&open),
        path,
        &GuardConfig::default(),
    );

    RouteReport {
        path: path.to_string(),
        route: matched.map(|r| r.pattern.clone()),
        decision,
    }
}

/// Inputs for a what-if registration report.
#[derive(Debug, Clone)]
pub struct RegistrationScenario {
    pub status: RegistrationStatus,
    pub stats: RegistrationStats,
    pub event_status: Option<EventStatus>,
    pub deadline_in_days: Option<i64>,
    pub actor: Actor,
}

pub fn registration(scenario: &RegistrationScenario, now: DateTime<Utc>) -> RegistrationView {
    let event = Event {
        id: EventId::from_u128(1),
        name: "Scenario".to_string(),
        description: None,
        status: scenario.event_status,
        start_date: None,
        end_date: None,
        registration_start_date: None,
        registration_end_date: None,
        update_deadline_date: scenario
            .deadline_in_days
            .map(|days| now + TimeDelta::days(days)),
        banner: None,
        location: None,
    };
    let registration = EventAcademyRegistration {
        event_id: event.id,
        academy_id: AcademyId::from_u128(1),
        academy: None,
        status: scenario.status,
        accepted_at: None,
        registered_at: None,
        stats: scenario.stats,
    };
    RegistrationView::build(registration, &event, Some(scenario.actor), now)
}
