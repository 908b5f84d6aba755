//! Academy registration lifecycle.
//!
//! ```text
//! invited ──accept──▶ accepted ──submit──▶ registered ──validate──▶ completed
//!    │                  │  ▲                   │                       │
//!  reject               │  └────reactivate─────┴───────reactivate──────┘
//!    ▼                  └──────────complete (admin)───────────────────▶ completed
//! rejected
//! ```
//!
//! `accept`, `reject` and `submit` belong to the academy; `complete`,
//! `validate` and `reactivate` to an admin. Everything here is a pure function
//! of the registration, its event and the current instant; the backend remains
//! the authority and these checks only keep obviously illegal requests from
//! being forwarded.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use dancehub_models::{
    Event, EventAcademyRegistration, EventStatus, RegistrationStats, RegistrationStatus, Role,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum completeness score for submitting a registration.
pub const SUBMIT_THRESHOLD: u8 = 70;

/// Window in which a future deadline counts as "soon".
pub const ENDING_SOON_DAYS: i64 = 3;

/// Weighted completeness: choreographies 40, dancers 30, coaches 20,
/// apparel 10. Capped at 100.
#[must_use]
pub fn completeness(stats: &RegistrationStats) -> u8 {
    let weights = [
        (stats.choreographies, 40u8),
        (stats.dancers, 30),
        (stats.coaches, 20),
        (stats.apparel, 10),
    ];
    let score: u8 = weights
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(_, weight)| *weight)
        .sum();
    score.min(100)
}

#[must_use]
pub fn is_submittable(stats: &RegistrationStats) -> bool {
    completeness(stats) >= SUBMIT_THRESHOLD
}

/// The event's own status when present, otherwise one derived from its dates.
#[must_use]
pub fn effective_event_status(event: &Event, now: DateTime<Utc>) -> EventStatus {
    if let Some(status) = event.status {
        return status;
    }

    match (event.start_date, event.end_date) {
        (Some(start), _) if now < start => EventStatus::Draft,
        (Some(start), Some(end)) if start <= now && now <= end => EventStatus::Open,
        (_, Some(end)) if now > end => EventStatus::Finished,
        _ => EventStatus::Draft,
    }
}

/// `date` lies in the future, at most [`ENDING_SOON_DAYS`] away.
#[must_use]
pub fn is_soon(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    date.is_some_and(|d| d > now && d - now <= TimeDelta::days(ENDING_SOON_DAYS))
}

/// A missing date never counts as passed.
#[must_use]
pub fn has_passed(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    date.is_some_and(|d| now > d)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFlags {
    pub can_modify: bool,
    pub registration_ending_soon: bool,
    pub update_deadline_soon: bool,
    pub update_deadline_passed: bool,
}

#[must_use]
pub fn registration_flags(
    status: RegistrationStatus,
    event: &Event,
    now: DateTime<Utc>,
) -> RegistrationFlags {
    let deadline_passed = has_passed(event.update_deadline_date, now);
    RegistrationFlags {
        can_modify: status == RegistrationStatus::Accepted
            && effective_event_status(event, now) == EventStatus::Open
            && !deadline_passed,
        registration_ending_soon: is_soon(event.registration_end_date, now),
        update_deadline_soon: is_soon(event.update_deadline_date, now),
        update_deadline_passed: deadline_passed,
    }
}

/// Who is acting on a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Academy,
    Admin,
}

impl Actor {
    /// Teachers and dancers never act on registrations.
    #[must_use]
    pub fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Actor::Admin),
            Role::Academy => Some(Actor::Academy),
            Role::Teacher | Role::Dancer => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationAction {
    Accept,
    Reject,
    Submit,
    Complete,
    Validate,
    Reactivate,
}

impl RegistrationAction {
    pub const ALL: [RegistrationAction; 6] = [
        RegistrationAction::Accept,
        RegistrationAction::Reject,
        RegistrationAction::Submit,
        RegistrationAction::Complete,
        RegistrationAction::Validate,
        RegistrationAction::Reactivate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RegistrationAction::Accept => "accept",
            RegistrationAction::Reject => "reject",
            RegistrationAction::Submit => "submit",
            RegistrationAction::Complete => "complete",
            RegistrationAction::Validate => "validate",
            RegistrationAction::Reactivate => "reactivate",
        }
    }

    #[must_use]
    pub const fn actor(self) -> Actor {
        match self {
            RegistrationAction::Accept
            | RegistrationAction::Reject
            | RegistrationAction::Submit => Actor::Academy,
            RegistrationAction::Complete
            | RegistrationAction::Validate
            | RegistrationAction::Reactivate => Actor::Admin,
        }
    }

    #[must_use]
    pub const fn target(self) -> RegistrationStatus {
        match self {
            RegistrationAction::Accept | RegistrationAction::Reactivate => {
                RegistrationStatus::Accepted
            }
            RegistrationAction::Reject => RegistrationStatus::Rejected,
            RegistrationAction::Submit => RegistrationStatus::Registered,
            RegistrationAction::Complete | RegistrationAction::Validate => {
                RegistrationStatus::Completed
            }
        }
    }

    /// States the action may start from.
    #[must_use]
    pub const fn sources(self) -> &'static [RegistrationStatus] {
        match self {
            RegistrationAction::Accept | RegistrationAction::Reject => {
                &[RegistrationStatus::Invited]
            }
            RegistrationAction::Submit | RegistrationAction::Complete => {
                &[RegistrationStatus::Accepted]
            }
            RegistrationAction::Validate => &[RegistrationStatus::Registered],
            RegistrationAction::Reactivate => {
                &[RegistrationStatus::Registered, RegistrationStatus::Completed]
            }
        }
    }
}

impl fmt::Display for RegistrationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegistrationAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown registration action: {s}"))
    }
}

/// Why an action is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    WrongActor,
    EventNotOpen,
    BelowThreshold,
    DeadlinePassed,
    Terminal,
    NotFromState,
}

impl BlockReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockReason::WrongActor => "wrong_actor",
            BlockReason::EventNotOpen => "event_not_open",
            BlockReason::BelowThreshold => "below_threshold",
            BlockReason::DeadlinePassed => "deadline_passed",
            BlockReason::Terminal => "terminal",
            BlockReason::NotFromState => "not_from_state",
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            BlockReason::WrongActor => "this role cannot perform it",
            BlockReason::EventNotOpen => "the event is not open",
            BlockReason::BelowThreshold => "the registration is less than 70% complete",
            BlockReason::DeadlinePassed => "the update deadline has passed",
            BlockReason::Terminal => "the registration was rejected",
            BlockReason::NotFromState => "it does not apply to the current status",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An action refused before reaching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action} a {from} registration: {reason}")]
pub struct TransitionError {
    pub action: RegistrationAction,
    pub from: RegistrationStatus,
    pub reason: BlockReason,
}

/// Checks `action` against the current registration and returns the status
/// it leads to.
///
/// Checks run in order: terminal state, source state, actor, then the
/// action's own preconditions.
pub fn apply(
    action: RegistrationAction,
    registration: &EventAcademyRegistration,
    event: &Event,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<RegistrationStatus, TransitionError> {
    let from = registration.status;
    let refuse = |reason| TransitionError {
        action,
        from,
        reason,
    };

    if from == RegistrationStatus::Rejected {
        return Err(refuse(BlockReason::Terminal));
    }
    if !action.sources().contains(&from) {
        return Err(refuse(BlockReason::NotFromState));
    }
    if action.actor() != actor {
        return Err(refuse(BlockReason::WrongActor));
    }

    match action {
        RegistrationAction::Accept
            if effective_event_status(event, now) != EventStatus::Open =>
        {
            Err(refuse(BlockReason::EventNotOpen))
        }
        RegistrationAction::Submit if !is_submittable(&registration.stats) => {
            Err(refuse(BlockReason::BelowThreshold))
        }
        RegistrationAction::Submit if has_passed(event.update_deadline_date, now) => {
            Err(refuse(BlockReason::DeadlinePassed))
        }
        _ => Ok(action.target()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionAvailability {
    pub action: RegistrationAction,
    pub target: RegistrationStatus,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BlockReason>,
}

/// Every action with whether `actor` may perform it right now.
#[must_use]
pub fn available_actions(
    registration: &EventAcademyRegistration,
    event: &Event,
    actor: Actor,
    now: DateTime<Utc>,
) -> Vec<ActionAvailability> {
    RegistrationAction::ALL
        .into_iter()
        .map(|action| {
            let outcome = apply(action, registration, event, actor, now);
            ActionAvailability {
                action,
                target: action.target(),
                enabled: outcome.is_ok(),
                reason: outcome.err().map(|e| e.reason),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dancehub_models::{AcademyId, EventId};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()
    }

    fn event(status: Option<EventStatus>) -> Event {
        Event {
            id: EventId::from_u128(1),
            name: "Copa Nacional".into(),
            description: None,
            status,
            start_date: Some(t0()),
            end_date: Some(t0() + TimeDelta::hours(1)),
            registration_start_date: None,
            registration_end_date: None,
            update_deadline_date: None,
            banner: None,
            location: None,
        }
    }

    fn registration(
        status: RegistrationStatus,
        stats: RegistrationStats,
    ) -> EventAcademyRegistration {
        EventAcademyRegistration {
            event_id: EventId::from_u128(1),
            academy_id: AcademyId::from_u128(2),
            academy: None,
            status,
            accepted_at: None,
            registered_at: None,
            stats,
        }
    }

    fn stats(choreographies: u32, dancers: u32, coaches: u32, apparel: u32) -> RegistrationStats {
        RegistrationStats {
            choreographies,
            dancers,
            coaches,
            apparel,
        }
    }

    #[test]
    fn test_completeness_weights() {
        assert_eq!(completeness(&stats(0, 0, 0, 0)), 0);
        assert_eq!(completeness(&stats(1, 0, 0, 0)), 40);
        assert_eq!(completeness(&stats(1, 1, 0, 0)), 70);
        assert_eq!(completeness(&stats(3, 12, 2, 5)), 100);
        assert!(is_submittable(&stats(1, 1, 0, 0)));
        assert!(!is_submittable(&stats(1, 0, 0, 0)));
        assert!(!is_submittable(&stats(0, 1, 1, 1)));
    }

    #[test]
    fn test_event_status_fallback_from_dates() {
        let ev = event(None);
        assert_eq!(
            effective_event_status(&ev, t0() - TimeDelta::minutes(1)),
            EventStatus::Draft
        );
        assert_eq!(
            effective_event_status(&ev, t0() + TimeDelta::minutes(30)),
            EventStatus::Open
        );
        assert_eq!(
            effective_event_status(&ev, t0() + TimeDelta::hours(2)),
            EventStatus::Finished
        );
    }

    #[test]
    fn test_event_status_prefers_backend_value() {
        let ev = event(Some(EventStatus::Closed));
        assert_eq!(
            effective_event_status(&ev, t0() + TimeDelta::minutes(30)),
            EventStatus::Closed
        );
    }

    #[test]
    fn test_event_status_without_dates_is_draft() {
        let mut ev = event(None);
        ev.start_date = None;
        ev.end_date = None;
        assert_eq!(effective_event_status(&ev, t0()), EventStatus::Draft);

        ev.start_date = Some(t0());
        assert_eq!(
            effective_event_status(&ev, t0() + TimeDelta::days(1)),
            EventStatus::Draft
        );
    }

    #[test]
    fn test_reject_from_invited_regardless_of_event() {
        for status in [None, Some(EventStatus::Draft), Some(EventStatus::Finished)] {
            let reg = registration(RegistrationStatus::Invited, RegistrationStats::default());
            let next = apply(
                RegistrationAction::Reject,
                &reg,
                &event(status),
                Actor::Academy,
                t0(),
            );
            assert_eq!(next, Ok(RegistrationStatus::Rejected));
        }
    }

    #[test]
    fn test_nothing_leaves_rejected() {
        let reg = registration(RegistrationStatus::Rejected, stats(1, 1, 1, 1));
        let ev = event(Some(EventStatus::Open));
        for actor in [Actor::Academy, Actor::Admin] {
            for action in RegistrationAction::ALL {
                let err = apply(action, &reg, &ev, actor, t0()).unwrap_err();
                assert_eq!(err.reason, BlockReason::Terminal);
            }
            assert!(available_actions(&reg, &ev, actor, t0())
                .iter()
                .all(|a| !a.enabled));
        }
    }

    #[test]
    fn test_accept_requires_open_event() {
        let reg = registration(RegistrationStatus::Invited, RegistrationStats::default());
        let open = apply(
            RegistrationAction::Accept,
            &reg,
            &event(Some(EventStatus::Open)),
            Actor::Academy,
            t0(),
        );
        assert_eq!(open, Ok(RegistrationStatus::Accepted));

        let draft = apply(
            RegistrationAction::Accept,
            &reg,
            &event(Some(EventStatus::Draft)),
            Actor::Academy,
            t0(),
        );
        assert_eq!(draft.unwrap_err().reason, BlockReason::EventNotOpen);
    }

    #[test]
    fn test_submit_threshold_and_deadline() {
        let mut ev = event(Some(EventStatus::Open));
        ev.update_deadline_date = Some(t0() + TimeDelta::days(1));

        let ready = registration(RegistrationStatus::Accepted, stats(1, 1, 0, 0));
        assert_eq!(
            apply(RegistrationAction::Submit, &ready, &ev, Actor::Academy, t0()),
            Ok(RegistrationStatus::Registered)
        );

        let thin = registration(RegistrationStatus::Accepted, stats(1, 0, 0, 0));
        let err = apply(RegistrationAction::Submit, &thin, &ev, Actor::Academy, t0()).unwrap_err();
        assert_eq!(err.reason, BlockReason::BelowThreshold);

        let late = t0() + TimeDelta::days(2);
        let err = apply(RegistrationAction::Submit, &ready, &ev, Actor::Academy, late).unwrap_err();
        assert_eq!(err.reason, BlockReason::DeadlinePassed);
    }

    #[test]
    fn test_submit_without_deadline_is_not_blocked() {
        let ev = event(Some(EventStatus::Open));
        let ready = registration(RegistrationStatus::Accepted, stats(1, 1, 0, 0));
        assert!(apply(RegistrationAction::Submit, &ready, &ev, Actor::Academy, t0()).is_ok());
    }

    #[test]
    fn test_admin_transitions() {
        let ev = event(Some(EventStatus::Open));
        use super::RegistrationAction as A;
        use dancehub_models::RegistrationStatus as S;

        let cases = [
            (S::Accepted, A::Complete, S::Completed),
            (S::Registered, A::Validate, S::Completed),
            (S::Registered, A::Reactivate, S::Accepted),
            (S::Completed, A::Reactivate, S::Accepted),
        ];
        for (from, action, to) in cases {
            let reg = registration(from, RegistrationStats::default());
            assert_eq!(apply(action, &reg, &ev, Actor::Admin, t0()), Ok(to));
            let err = apply(action, &reg, &ev, Actor::Academy, t0()).unwrap_err();
            assert_eq!(err.reason, BlockReason::WrongActor);
        }
    }

    #[test]
    fn test_academy_cannot_act_for_admin_and_vice_versa() {
        let ev = event(Some(EventStatus::Open));
        let reg = registration(RegistrationStatus::Invited, RegistrationStats::default());
        let err = apply(RegistrationAction::Accept, &reg, &ev, Actor::Admin, t0()).unwrap_err();
        assert_eq!(err.reason, BlockReason::WrongActor);
    }

    #[test]
    fn test_available_actions_for_invited_academy() {
        let ev = event(Some(EventStatus::Open));
        let reg = registration(RegistrationStatus::Invited, RegistrationStats::default());
        let actions = available_actions(&reg, &ev, Actor::Academy, t0());
        let enabled: Vec<_> = actions.iter().filter(|a| a.enabled).map(|a| a.action).collect();
        assert_eq!(enabled, vec![RegistrationAction::Accept, RegistrationAction::Reject]);

        let submit = actions
            .iter()
            .find(|a| a.action == RegistrationAction::Submit)
            .unwrap();
        assert_eq!(submit.reason, Some(BlockReason::NotFromState));
    }

    #[test]
    fn test_flags() {
        let mut ev = event(Some(EventStatus::Open));
        ev.update_deadline_date = Some(t0() + TimeDelta::days(2));
        ev.registration_end_date = Some(t0() + TimeDelta::days(10));

        let flags = registration_flags(RegistrationStatus::Accepted, &ev, t0());
        assert!(flags.can_modify);
        assert!(flags.update_deadline_soon);
        assert!(!flags.registration_ending_soon);
        assert!(!flags.update_deadline_passed);

        let after = t0() + TimeDelta::days(3);
        let flags = registration_flags(RegistrationStatus::Accepted, &ev, after);
        assert!(!flags.can_modify);
        assert!(!flags.update_deadline_soon);
        assert!(flags.update_deadline_passed);

        let flags = registration_flags(RegistrationStatus::Registered, &ev, t0());
        assert!(!flags.can_modify);
    }

    #[test]
    fn test_missing_dates_never_flag() {
        let ev = event(Some(EventStatus::Open));
        let flags = registration_flags(RegistrationStatus::Accepted, &ev, t0());
        assert!(flags.can_modify);
        assert!(!flags.registration_ending_soon);
        assert!(!flags.update_deadline_soon);
        assert!(!flags.update_deadline_passed);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("validate".parse::<RegistrationAction>(), Ok(RegistrationAction::Validate));
        assert!("approve".parse::<RegistrationAction>().is_err());
        assert_eq!(Actor::from_role(Role::Teacher), None);
    }
}
