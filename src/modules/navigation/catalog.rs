//! The dashboard sidebar.

use dancehub_auth::AccessRequirement as Access;
use dancehub_core::permissions as p;
use dancehub_models::Role;

use super::model::NavNode;

const HELP_URL: &str = "https://ayuda.dancehub.app";

pub fn dashboard_navigation() -> Vec<NavNode> {
    vec![
        NavNode::title("General", Access::open()),
        NavNode::item("Inicio", "/dashboard", "home", Access::open()),
        NavNode::title("Administración", Access::roles(&[Role::Admin])),
        NavNode::group(
            "Usuarios",
            "users",
            Access::open(),
            vec![
                NavNode::item("Usuarios", "/users", "user", Access::permission(p::USERS_READ)),
                NavNode::item(
                    "Permisos",
                    "/users/permissions",
                    "shield",
                    Access::permission(p::USERS_MANAGE_PERMISSIONS),
                ),
            ],
        ),
        NavNode::title("Gestión", Access::open()),
        NavNode::group(
            "Academias",
            "building",
            Access::open(),
            vec![
                NavNode::item(
                    "Academias",
                    "/academies",
                    "building",
                    Access::permission(p::ACADEMIES_READ),
                ),
                NavNode::item(
                    "Bailarines",
                    "/dancers",
                    "music",
                    Access::permission(p::DANCERS_READ),
                ),
                NavNode::item("Coaches", "/coaches", "award", Access::permission(p::COACHES_READ)),
            ],
        ),
        NavNode::group(
            "Eventos",
            "calendar",
            Access::open(),
            vec![
                NavNode::item("Eventos", "/events", "calendar", Access::permission(p::EVENTS_READ)),
                NavNode::item(
                    "Mis invitaciones",
                    "/academy/events",
                    "mail",
                    Access::roles(&[Role::Academy]),
                ),
                NavNode::item(
                    "Inscripciones",
                    "/registrations",
                    "clipboard",
                    Access::permissions(&[p::REGISTRATIONS_READ, p::REGISTRATIONS_REVIEW]),
                ),
            ],
        ),
        NavNode::item(
            "Coreografías",
            "/choreographies",
            "film",
            Access::permission(p::CHOREOGRAPHIES_READ),
        ),
        NavNode::item("Vestuario", "/apparel", "shirt", Access::permission(p::APPAREL_READ)),
        NavNode::item("Reportes", "/reports", "bar-chart", Access::permission(p::REPORTS_VIEW)),
        NavNode::link("Ayuda", HELP_URL, "help-circle"),
    ]
}
