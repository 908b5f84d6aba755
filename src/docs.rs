use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use dancehub_auth::AccessRequirement;
use dancehub_auth::overrides::ModuleGroup;
use dancehub_core::{PaginationMeta, PaginationParams};
use dancehub_models::{
    AcademySummary, AssignAcademyDto, Event, EventAcademyRegistration, EventStatus, Permission,
    PermissionModule, RegistrationStats, RegistrationStatus, Role, SyncUserPermissionsDto, User,
};

use crate::modules::events::model::{EventView, PaginatedEventViews};
use crate::modules::navigation::model::{NavGroup, NavItem, NavNode, NavTitle, NavigationResponse};
use crate::modules::permissions::model::{TogglePermissionDto, UserPermissionsView};
use crate::modules::registrations::model::{AcademyEventView, RegistrationView};
use crate::modules::registrations::state_machine::{
    ActionAvailability, Actor, BlockReason, RegistrationAction, RegistrationFlags,
};
use crate::modules::routes::guard::GuardDecision;
use crate::modules::routes::model::RouteAccessResponse;
use crate::modules::session::model::SessionResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::session::controller::get_session,
        crate::modules::navigation::controller::get_navigation,
        crate::modules::routes::controller::get_route_access,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::get_permission_modules,
        crate::modules::permissions::controller::get_role_permissions,
        crate::modules::permissions::controller::get_user_permissions,
        crate::modules::permissions::controller::sync_user_permissions,
        crate::modules::permissions::controller::toggle_user_permission,
        crate::modules::permissions::controller::remove_permission_overrides,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::get_event,
        crate::modules::registrations::controller::get_event_registrations,
        crate::modules::registrations::controller::assign_academy,
        crate::modules::registrations::controller::transition_registration,
        crate::modules::registrations::controller::get_academy_events,
    ),
    components(
        schemas(
            User,
            Role,
            AcademySummary,
            SessionResponse,
            ModuleGroup,
            AccessRequirement,
            NavNode,
            NavItem,
            NavGroup,
            NavTitle,
            NavigationResponse,
            GuardDecision,
            RouteAccessResponse,
            Permission,
            PermissionModule,
            SyncUserPermissionsDto,
            TogglePermissionDto,
            UserPermissionsView,
            Event,
            EventStatus,
            EventView,
            PaginatedEventViews,
            PaginationMeta,
            PaginationParams,
            AssignAcademyDto,
            EventAcademyRegistration,
            RegistrationStatus,
            RegistrationStats,
            RegistrationView,
            RegistrationFlags,
            RegistrationAction,
            ActionAvailability,
            Actor,
            BlockReason,
            AcademyEventView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Session", description = "Signed-in user and effective permissions"),
        (name = "Navigation", description = "Sidebar menu filtered for the caller"),
        (name = "Routes", description = "Route guard decisions"),
        (name = "Permissions", description = "Permission catalog and per-user overrides"),
        (name = "Events", description = "Events with their resolved status"),
        (name = "Registrations", description = "Academy invitations and registration lifecycle")
    ),
    info(
        title = "DanceHub Dashboard API",
        version = "0.1.0",
        description = "Role-aware gateway between the DanceHub dashboard and its REST backend.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
