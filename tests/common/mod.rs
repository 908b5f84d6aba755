//! In-memory backend and request helpers for the router tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use chrono::{DateTime, TimeDelta, Utc};
use dancehub::router::init_router;
use dancehub::state::AppState;
use dancehub_auth::RolePermissionSet;
use dancehub_auth::overrides::overrides_for;
use dancehub_client::{
    AuthProvider, BearerToken, ClientError, ClientResult, EventsApi, PermissionsApi,
};
use dancehub_config::{CorsConfig, GuardConfig};
use dancehub_core::{PaginationMeta, permissions as p};
use dancehub_models::{
    AcademyEventEntry, AcademyId, AssignAcademyDto, Event, EventAcademyRegistration, EventId,
    EventQuery, EventStatus, OverrideRecord, PaginatedEvents, Permission, PermissionId,
    PermissionModule, PermissionRef, RegistrationStats, RegistrationStatus, Role,
    SyncUserPermissionsDto, User, UserId, UserPermissionsDetail,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const ACADEMY_TOKEN: &str = "academy-token";
pub const OTHER_ACADEMY_TOKEN: &str = "other-academy-token";
pub const TEACHER_TOKEN: &str = "teacher-token";
pub const DANCER_TOKEN: &str = "dancer-token";

pub const EVENT_ID: EventId = EventId::from_u128(0x100);
pub const ACADEMY_ID: AcademyId = AcademyId::from_u128(0x200);
pub const OTHER_ACADEMY_ID: AcademyId = AcademyId::from_u128(0x201);
pub const TEACHER_ID: UserId = UserId::from_u128(0x300);
pub const ADMIN_ID: UserId = UserId::from_u128(0x301);

fn not_found(what: &str) -> ClientError {
    ClientError::from_response(
        StatusCode::NOT_FOUND,
        &format!(r#"{{"message":"{what} not found"}}"#),
    )
}

fn catalog_entry(code: &str) -> Permission {
    Permission {
        id: PermissionId::from_u128(code.len() as u128),
        code: code.to_string(),
        name: code.to_string(),
        description: None,
        module: p::module_of(code).to_string(),
    }
}

#[derive(Default)]
struct Store {
    users: HashMap<String, User>,
    events: Vec<Event>,
    registrations: Vec<EventAcademyRegistration>,
    details: HashMap<UserId, UserPermissionsDetail>,
    extra_catalog: Vec<String>,
    event_after_mutation: Option<Event>,
    forwarded: Vec<String>,
}

/// Backend double. Mutations are recorded in `forwarded()` in call order.
#[derive(Default)]
pub struct FakeBackend {
    store: Mutex<Store>,
    mutation_delay: Mutex<Option<Duration>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: &str, user: User) -> Self {
        self.store
            .lock()
            .unwrap()
            .users
            .insert(token.to_string(), user);
        self
    }

    pub fn with_event(self, event: Event) -> Self {
        self.store.lock().unwrap().events.push(event);
        self
    }

    pub fn with_registration(self, registration: EventAcademyRegistration) -> Self {
        self.store.lock().unwrap().registrations.push(registration);
        self
    }

    pub fn with_detail(self, user_id: UserId, detail: UserPermissionsDetail) -> Self {
        self.store.lock().unwrap().details.insert(user_id, detail);
        self
    }

    /// Replaces the stored event with `event` once a registration status changes.
    pub fn with_event_after_mutation(self, event: Event) -> Self {
        self.store.lock().unwrap().event_after_mutation = Some(event);
        self
    }

    /// A code the backend lists that the built-in catalog does not know.
    pub fn with_catalog_code(self, code: &str) -> Self {
        self.store
            .lock()
            .unwrap()
            .extra_catalog
            .push(code.to_string());
        self
    }

    pub fn with_mutation_delay(self, delay: Duration) -> Self {
        *self.mutation_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn forwarded(&self) -> Vec<String> {
        self.store.lock().unwrap().forwarded.clone()
    }

    pub fn registration_status(
        &self,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> Option<RegistrationStatus> {
        self.store
            .lock()
            .unwrap()
            .registrations
            .iter()
            .find(|r| r.event_id == event_id && r.academy_id == academy_id)
            .map(|r| r.status)
    }

    async fn pause(&self) {
        let delay = *self.mutation_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn set_status(
        &self,
        event_id: EventId,
        academy_id: AcademyId,
        status: RegistrationStatus,
        call: String,
    ) -> ClientResult<()> {
        let mut store = self.store.lock().unwrap();
        let registration = store
            .registrations
            .iter_mut()
            .find(|r| r.event_id == event_id && r.academy_id == academy_id)
            .ok_or_else(|| not_found("Registration"))?;
        registration.status = status;
        store.forwarded.push(call);
        if let Some(event) = store.event_after_mutation.take() {
            store.events.retain(|e| e.id != event.id);
            store.events.push(event);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for FakeBackend {
    async fn current_user(&self, token: &BearerToken) -> ClientResult<User> {
        self.store
            .lock()
            .unwrap()
            .users
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| {
                ClientError::from_response(
                    StatusCode::UNAUTHORIZED,
                    r#"{"message":"Token expired"}"#,
                )
            })
    }
}

#[async_trait]
impl PermissionsApi for FakeBackend {
    async fn list_permissions(&self, _token: &BearerToken) -> ClientResult<Vec<Permission>> {
        let extra = self.store.lock().unwrap().extra_catalog.clone();
        Ok(p::CATALOG
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(catalog_entry)
            .collect())
    }

    async fn list_permission_modules(
        &self,
        token: &BearerToken,
    ) -> ClientResult<Vec<PermissionModule>> {
        let mut modules: Vec<PermissionModule> = Vec::new();
        for permission in self.list_permissions(token).await? {
            match modules.iter_mut().find(|m| m.module == permission.module) {
                Some(module) => module.permissions.push(permission),
                None => modules.push(PermissionModule {
                    module: permission.module.clone(),
                    permissions: vec![permission],
                }),
            }
        }
        Ok(modules)
    }

    async fn get_permissions_by_role(
        &self,
        _token: &BearerToken,
        role: Role,
    ) -> ClientResult<Vec<Permission>> {
        Ok(RolePermissionSet::builtin()
            .defaults_for(role)
            .iter()
            .map(|code| catalog_entry(code))
            .collect())
    }

    async fn get_user_permissions_detail(
        &self,
        _token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<UserPermissionsDetail> {
        self.store
            .lock()
            .unwrap()
            .details
            .get(&user_id)
            .cloned()
            .ok_or_else(|| not_found("User"))
    }

    async fn sync_user_permissions(
        &self,
        _token: &BearerToken,
        user_id: UserId,
        dto: &SyncUserPermissionsDto,
    ) -> ClientResult<()> {
        self.pause().await;
        let defaults = RolePermissionSet::builtin().defaults_for(dto.role);
        let desired = dto.permission_codes.iter().cloned().collect();
        let overrides = overrides_for(&defaults, &desired)
            .into_iter()
            .map(|o| OverrideRecord {
                permission: PermissionRef { code: o.code },
                granted: o.granted,
            })
            .collect();

        let mut store = self.store.lock().unwrap();
        store.details.insert(
            user_id,
            UserPermissionsDetail {
                role: Some(dto.role),
                role_permissions: defaults.iter().map(|c| catalog_entry(c)).collect(),
                overrides,
            },
        );
        store.forwarded.push(format!("sync:{user_id}"));
        Ok(())
    }

    async fn remove_all_permission_overrides(
        &self,
        _token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<()> {
        let mut store = self.store.lock().unwrap();
        let detail = store
            .details
            .get_mut(&user_id)
            .ok_or_else(|| not_found("User"))?;
        detail.overrides.clear();
        store.forwarded.push(format!("clear:{user_id}"));
        Ok(())
    }
}

#[async_trait]
impl EventsApi for FakeBackend {
    async fn list_events(
        &self,
        _token: &BearerToken,
        query: &EventQuery,
    ) -> ClientResult<PaginatedEvents> {
        let store = self.store.lock().unwrap();
        let data: Vec<Event> = store
            .events
            .iter()
            .filter(|e| query.status.is_none_or(|s| e.status == Some(s)))
            .filter(|e| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|s| e.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        let total = data.len() as i64;
        Ok(PaginatedEvents {
            data,
            meta: PaginationMeta {
                total,
                limit: query.pagination.limit(),
                page: query.pagination.page(),
                total_pages: 1,
            },
        })
    }

    async fn get_event(&self, _token: &BearerToken, event_id: EventId) -> ClientResult<Event> {
        self.store
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| not_found("Event"))
    }

    async fn get_event_academies(
        &self,
        _token: &BearerToken,
        event_id: EventId,
    ) -> ClientResult<Vec<EventAcademyRegistration>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn get_event_academy(
        &self,
        _token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<EventAcademyRegistration> {
        self.store
            .lock()
            .unwrap()
            .registrations
            .iter()
            .find(|r| r.event_id == event_id && r.academy_id == academy_id)
            .cloned()
            .ok_or_else(|| not_found("Registration"))
    }

    async fn assign_academy_to_event(
        &self,
        _token: &BearerToken,
        event_id: EventId,
        dto: &AssignAcademyDto,
    ) -> ClientResult<EventAcademyRegistration> {
        let mut store = self.store.lock().unwrap();
        if store
            .registrations
            .iter()
            .any(|r| r.event_id == event_id && r.academy_id == dto.academy_id)
        {
            return Err(ClientError::from_response(
                StatusCode::CONFLICT,
                r#"{"message":["Academy already invited"]}"#,
            ));
        }
        let registration = registration(
            event_id,
            dto.academy_id,
            RegistrationStatus::Invited,
            RegistrationStats::default(),
        );
        store.registrations.push(registration.clone());
        store.forwarded.push(format!("assign:{}", dto.academy_id));
        Ok(registration)
    }

    async fn update_event_academy_status(
        &self,
        _token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        status: RegistrationStatus,
    ) -> ClientResult<()> {
        self.pause().await;
        self.set_status(event_id, academy_id, status, format!("status:{status}"))
    }

    async fn get_academy_events(
        &self,
        _token: &BearerToken,
        academy_id: AcademyId,
    ) -> ClientResult<Vec<AcademyEventEntry>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .registrations
            .iter()
            .filter(|r| r.academy_id == academy_id)
            .filter_map(|r| {
                store
                    .events
                    .iter()
                    .find(|e| e.id == r.event_id)
                    .map(|event| AcademyEventEntry {
                        event: event.clone(),
                        registration: r.clone(),
                    })
            })
            .collect())
    }

    async fn respond_to_invitation(
        &self,
        _token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        accept: bool,
    ) -> ClientResult<()> {
        self.pause().await;
        let status = if accept {
            RegistrationStatus::Accepted
        } else {
            RegistrationStatus::Rejected
        };
        self.set_status(event_id, academy_id, status, format!("respond:{accept}"))
    }

    async fn submit_registration(
        &self,
        _token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<()> {
        self.pause().await;
        self.set_status(
            event_id,
            academy_id,
            RegistrationStatus::Registered,
            "submit".to_string(),
        )
    }
}

pub fn user(id: UserId, role: Role, academy_id: Option<AcademyId>) -> User {
    User {
        id,
        email: format!("{role}@dancehub.test"),
        name: Some(format!("Test {role}")),
        role,
        permissions: Vec::new(),
        academy_id,
        academy: None,
    }
}

/// Backend with one user per role, keyed by the token constants.
pub fn backend_with_users() -> FakeBackend {
    FakeBackend::new()
        .with_user(ADMIN_TOKEN, user(ADMIN_ID, Role::Admin, None))
        .with_user(
            ACADEMY_TOKEN,
            user(UserId::from_u128(0x302), Role::Academy, Some(ACADEMY_ID)),
        )
        .with_user(
            OTHER_ACADEMY_TOKEN,
            user(UserId::from_u128(0x303), Role::Academy, Some(OTHER_ACADEMY_ID)),
        )
        .with_user(TEACHER_TOKEN, user(TEACHER_ID, Role::Teacher, None))
        .with_user(DANCER_TOKEN, user(UserId::from_u128(0x304), Role::Dancer, None))
}

/// An event open for registration with the update deadline `deadline_in` away.
pub fn open_event(now: DateTime<Utc>, deadline_in: TimeDelta) -> Event {
    Event {
        id: EVENT_ID,
        name: "Concurso Nacional de Marinera".to_string(),
        description: None,
        status: Some(EventStatus::Open),
        start_date: Some(now + TimeDelta::days(30)),
        end_date: Some(now + TimeDelta::days(32)),
        registration_start_date: Some(now - TimeDelta::days(10)),
        registration_end_date: Some(now + TimeDelta::days(20)),
        update_deadline_date: Some(now + deadline_in),
        banner: None,
        location: Some("Trujillo".to_string()),
    }
}

pub fn registration(
    event_id: EventId,
    academy_id: AcademyId,
    status: RegistrationStatus,
    stats: RegistrationStats,
) -> EventAcademyRegistration {
    EventAcademyRegistration {
        event_id,
        academy_id,
        academy: None,
        status,
        accepted_at: None,
        registered_at: None,
        stats,
    }
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    let state = AppState::new(
        backend,
        GuardConfig::default(),
        CorsConfig::from_lookup(|_| None),
    );
    init_router(state)
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Permission detail as the backend reports it for a user of `role`.
pub fn detail_for(role: Role, overrides: Vec<OverrideRecord>) -> UserPermissionsDetail {
    UserPermissionsDetail {
        role: Some(role),
        role_permissions: RolePermissionSet::builtin()
            .defaults_for(role)
            .iter()
            .map(|code| catalog_entry(code))
            .collect(),
        overrides,
    }
}
