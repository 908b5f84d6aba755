//! `reqwest` implementation of the backend collaborators.

use async_trait::async_trait;
use dancehub_config::BackendConfig;
use dancehub_models::{
    AcademyEventEntry, AcademyId, AssignAcademyDto, Event, EventAcademyRegistration, EventId,
    EventQuery, PaginatedEvents, Permission, PermissionModule, RegistrationStatus, Role,
    SyncUserPermissionsDto, UpdateRegistrationStatusDto, User, UserId, UserPermissionsDetail,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;

use crate::api::{AuthProvider, BearerToken, ClientResult, EventsApi, PermissionsApi};
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decodes `T`, accepting both the bare payload and a `{"data": T}` envelope.
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    match serde_json::from_slice::<T>(bytes) {
        Ok(value) => Ok(value),
        Err(bare_err) => serde_json::from_slice::<Envelope<T>>(bytes)
            .map(|env| env.data)
            .map_err(|_| ClientError::Decode(bare_err.to_string())),
    }
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn request(&self, method: Method, token: &BearerToken, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token.as_str())
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, "Backend returned an error status");
        Err(ClientError::from_response(status, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::check(request.send().await?).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, token: &BearerToken, path: &str) -> ClientResult<T> {
        self.fetch(self.request(Method::GET, token, path)).await
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        token: &BearerToken,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        self.execute(self.request(method, token, path).json(body))
            .await
    }
}

#[async_trait]
impl AuthProvider for HttpBackend {
    #[instrument(skip(self, token))]
    async fn current_user(&self, token: &BearerToken) -> ClientResult<User> {
        self.get(token, "/auth/me").await
    }
}

#[async_trait]
impl PermissionsApi for HttpBackend {
    #[instrument(skip(self, token))]
    async fn list_permissions(&self, token: &BearerToken) -> ClientResult<Vec<Permission>> {
        self.get(token, "/permissions").await
    }

    #[instrument(skip(self, token))]
    async fn list_permission_modules(
        &self,
        token: &BearerToken,
    ) -> ClientResult<Vec<PermissionModule>> {
        self.get(token, "/permissions/modules").await
    }

    #[instrument(skip(self, token))]
    async fn get_permissions_by_role(
        &self,
        token: &BearerToken,
        role: Role,
    ) -> ClientResult<Vec<Permission>> {
        self.get(token, &format!("/permissions/role/{role}")).await
    }

    #[instrument(skip(self, token))]
    async fn get_user_permissions_detail(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<UserPermissionsDetail> {
        self.get(token, &format!("/permissions/user/{user_id}")).await
    }

    #[instrument(skip(self, token, dto), fields(code_count = dto.permission_codes.len()))]
    async fn sync_user_permissions(
        &self,
        token: &BearerToken,
        user_id: UserId,
        dto: &SyncUserPermissionsDto,
    ) -> ClientResult<()> {
        self.send(
            Method::PUT,
            token,
            &format!("/permissions/user/{user_id}/sync"),
            dto,
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn remove_all_permission_overrides(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> ClientResult<()> {
        self.execute(self.request(
            Method::DELETE,
            token,
            &format!("/permissions/user/{user_id}/overrides"),
        ))
        .await
    }
}

#[async_trait]
impl EventsApi for HttpBackend {
    #[instrument(skip(self, token))]
    async fn list_events(
        &self,
        token: &BearerToken,
        query: &EventQuery,
    ) -> ClientResult<PaginatedEvents> {
        self.fetch(
            self.request(Method::GET, token, "/events")
                .query(&query.to_query()),
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn get_event(&self, token: &BearerToken, event_id: EventId) -> ClientResult<Event> {
        self.get(token, &format!("/events/{event_id}")).await
    }

    #[instrument(skip(self, token))]
    async fn get_event_academies(
        &self,
        token: &BearerToken,
        event_id: EventId,
    ) -> ClientResult<Vec<EventAcademyRegistration>> {
        self.get(token, &format!("/events/{event_id}/academies"))
            .await
    }

    #[instrument(skip(self, token))]
    async fn get_event_academy(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<EventAcademyRegistration> {
        self.get(token, &format!("/events/{event_id}/academies/{academy_id}"))
            .await
    }

    #[instrument(skip(self, token, dto))]
    async fn assign_academy_to_event(
        &self,
        token: &BearerToken,
        event_id: EventId,
        dto: &AssignAcademyDto,
    ) -> ClientResult<EventAcademyRegistration> {
        self.fetch(
            self.request(Method::POST, token, &format!("/events/{event_id}/academies"))
                .json(dto),
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn update_event_academy_status(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        status: RegistrationStatus,
    ) -> ClientResult<()> {
        self.send(
            Method::PATCH,
            token,
            &format!("/events/{event_id}/academies/{academy_id}/status"),
            &UpdateRegistrationStatusDto { status },
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn get_academy_events(
        &self,
        token: &BearerToken,
        academy_id: AcademyId,
    ) -> ClientResult<Vec<AcademyEventEntry>> {
        self.get(token, &format!("/academies/{academy_id}/events"))
            .await
    }

    #[instrument(skip(self, token))]
    async fn respond_to_invitation(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
        accept: bool,
    ) -> ClientResult<()> {
        self.send(
            Method::POST,
            token,
            &format!("/events/{event_id}/academies/{academy_id}/respond"),
            &json!({ "accept": accept }),
        )
        .await
    }

    #[instrument(skip(self, token))]
    async fn submit_registration(
        &self,
        token: &BearerToken,
        event_id: EventId,
        academy_id: AcademyId,
    ) -> ClientResult<()> {
        self.execute(self.request(
            Method::POST,
            token,
            &format!("/events/{event_id}/academies/{academy_id}/submit"),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_payload() {
        let perms: Vec<String> = decode_body(br#"["events.read"]"#).unwrap();
        assert_eq!(perms, vec!["events.read"]);
    }

    #[test]
    fn test_decode_enveloped_payload() {
        let perms: Vec<String> = decode_body(br#"{"data":["events.read"]}"#).unwrap();
        assert_eq!(perms, vec!["events.read"]);
    }

    #[test]
    fn test_decode_mismatch_is_decode_error() {
        let result: ClientResult<Vec<String>> = decode_body(br#"{"items":[]}"#);
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_new_uses_config_base_url() {
        let backend = HttpBackend::new(&BackendConfig::default()).unwrap();
        assert_eq!(backend.base_url, "http://localhost:8000/api");
    }
}
