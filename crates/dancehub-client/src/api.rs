//! Collaborator seams for the REST backend.
//!
//! The gateway only ever talks to the backend through these traits, which
//! keeps handlers testable against an in-memory fake.

use std::fmt;

use async_trait::async_trait;
use dancehub_models::{
    AcademyEventEntry, AcademyId, AssignAcademyDto, Event, EventAcademyRegistration, EventId,
    EventQuery, PaginatedEvents, Permission, PermissionModule, RegistrationStatus, Role,
    SyncUserPermissionsDto, User, UserId, UserPermissionsDetail,
};

use crate::error::ClientError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Bearer token forwarded from the SPA. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves the user behind `token`. A `401` means the session is gone.
    async fn current_user(&self, token: &BearerToken) -> ClientResult<User>;
}

#[async_trait]
pub trait PermissionsApi: Send + Sync {
    async fn list_permissions(&self, token: &BearerToken) -> ClientResult<Vec<Permission>>;

    async fn list_permission_modules(
        &self,
        token: &BearerToken,
    ) -> ClientResult<Vec<PermissionModule>>;

    async fn get_permissions_by_role(
        &self,
        token: &BearerToken,
        role: Role,
    ) -> ClientResult<Vec<Permission>>;

    async fn get_user_permissions_detail(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<UserPermissionsDetail>;

    async fn sync_user_permissions(
        &self,
        token: &BearerToken,
        user_id: UserId,
        dto: &SyncUserPermissionsDto,
    ) -> ClientResult<()>;

    async fn remove_all_permission_overrides(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<()>;
}

#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(
        &self,
        token: &BearerToken,
        query: &EventQuery,
    ) -> ClientResult<PaginatedEvents>;

    async fn get_event(&self, token: &BearerToken, event_id: EventId) -> ClientResult<Event>;

    async fn get_event_academies(
        &self,
        token: &BearerToken,
        event_id: EventId,
    ) -> ClientResult<Vec<EventAcademyRegistration>>;

    async fn get_event_academy(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<EventAcademyRegistration>;

    async fn assign_academy_to_event(
        &self,
        token: &BearerToken,
        event_id: EventId,
        dto: &AssignAcademyDto,
    ) -> ClientResult<EventAcademyRegistration>;

    /// Admin status change (validate, reactivate, complete).
    async fn update_event_academy_status(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        status: RegistrationStatus,
    ) -> ClientResult<()>;

    /// Academy-facing invitation list.
    async fn get_academy_events(
        &self,
        token: &BearerToken,
        academy_id: AcademyId,
    ) -> ClientResult<Vec<AcademyEventEntry>>;

    /// Academy accepts (`true`) or rejects (`false`) an invitation.
    async fn respond_to_invitation(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        accept: bool,
    ) -> ClientResult<()>;

    async fn submit_registration(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<()>;
}

/// Everything the gateway needs from the backend.
pub trait Backend: AuthProvider + PermissionsApi + EventsApi {}

impl<T> Backend for T where T: AuthProvider + PermissionsApi + EventsApi {}
