use dancehub_auth::AccessRequirement as Access;
use dancehub_core::permissions as p;
use dancehub_models::Role;

use super::model::RouteDefinition;

/// Ordered route list; the first matching pattern wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        Self { routes }
    }

    /// The dashboard's SPA routes.
    pub fn dashboard() -> Self {
        Self::new(vec![
            RouteDefinition::new("/dashboard", Access::open()),
            RouteDefinition::new("/users", Access::permission(p::USERS_READ)),
            RouteDefinition::new(
                "/users/permissions",
                Access::permission(p::USERS_MANAGE_PERMISSIONS),
            ),
            RouteDefinition::new("/users/:id", Access::permission(p::USERS_READ)),
            RouteDefinition::new(
                "/users/:id/permissions",
                Access::permission(p::USERS_MANAGE_PERMISSIONS),
            ),
            RouteDefinition::new("/academies", Access::permission(p::ACADEMIES_READ)),
            RouteDefinition::new("/academies/new", Access::permission(p::ACADEMIES_CREATE)),
            RouteDefinition::new("/academies/:id", Access::permission(p::ACADEMIES_READ)),
            RouteDefinition::new("/dancers", Access::permission(p::DANCERS_READ)),
            RouteDefinition::new("/coaches", Access::permission(p::COACHES_READ)),
            RouteDefinition::new("/events", Access::permission(p::EVENTS_READ)),
            RouteDefinition::new("/events/new", Access::permission(p::EVENTS_CREATE)),
            RouteDefinition::new("/events/:id", Access::permission(p::EVENTS_READ)),
            RouteDefinition::new("/events/:id/edit", Access::permission(p::EVENTS_UPDATE)),
            RouteDefinition::new(
                "/events/:id/academies",
                Access::roles(&[Role::Admin]).and_permission(p::EVENTS_ASSIGN_ACADEMIES),
            ),
            RouteDefinition::new(
                "/academy/events",
                Access::roles(&[Role::Academy])
                    .and_permission(p::EVENTS_READ)
                    .and_permission(p::REGISTRATIONS_READ),
            )
            .require_all(),
            RouteDefinition::new(
                "/academy/events/:id",
                Access::roles(&[Role::Academy]).and_permission(p::REGISTRATIONS_MANAGE),
            ),
            RouteDefinition::new(
                "/registrations",
                Access::permissions(&[p::REGISTRATIONS_READ, p::REGISTRATIONS_REVIEW]),
            ),
            RouteDefinition::new("/choreographies", Access::permission(p::CHOREOGRAPHIES_READ)),
            RouteDefinition::new("/apparel", Access::permission(p::APPAREL_READ)),
            RouteDefinition::new("/reports", Access::permission(p::REPORTS_VIEW)),
            RouteDefinition::new(
                "/reports/export",
                Access::permissions(&[p::REPORTS_VIEW, p::REPORTS_EXPORT]),
            )
            .require_all(),
        ])
    }

    /// First route matching `location`; the query string is ignored.
    pub fn find(&self, location: &str) -> Option<&RouteDefinition> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }
}
