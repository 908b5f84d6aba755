use dancehub_auth::AccessRequirement;
use serde::Serialize;
use utoipa::ToSchema;

/// A link in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    /// SPA route, or an absolute URL when `external` is set.
    pub to: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "AccessRequirement::is_open")]
    pub access: AccessRequirement,
}

/// Collapsible section. Never rendered without children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavGroup {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "AccessRequirement::is_open")]
    pub access: AccessRequirement,
    #[schema(no_recursion)]
    pub children: Vec<NavNode>,
}

/// Non-clickable section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavTitle {
    pub label: String,
    #[serde(skip_serializing_if = "AccessRequirement::is_open")]
    pub access: AccessRequirement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavNode {
    Item(NavItem),
    Group(NavGroup),
    Title(NavTitle),
}

impl NavNode {
    pub fn item(label: &str, to: &str, icon: &str, access: AccessRequirement) -> Self {
        NavNode::Item(NavItem {
            label: label.to_string(),
            to: to.to_string(),
            external: false,
            icon: Some(icon.to_string()),
            access,
        })
    }

    pub fn link(label: &str, url: &str, icon: &str) -> Self {
        NavNode::Item(NavItem {
            label: label.to_string(),
            to: url.to_string(),
            external: true,
            icon: Some(icon.to_string()),
            access: AccessRequirement::open(),
        })
    }

    pub fn group(
        label: &str,
        icon: &str,
        access: AccessRequirement,
        children: Vec<NavNode>,
    ) -> Self {
        NavNode::Group(NavGroup {
            label: label.to_string(),
            icon: Some(icon.to_string()),
            access,
            children,
        })
    }

    pub fn title(label: &str, access: AccessRequirement) -> Self {
        NavNode::Title(NavTitle {
            label: label.to_string(),
            access,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            NavNode::Item(item) => &item.label,
            NavNode::Group(group) => &group.label,
            NavNode::Title(title) => &title.label,
        }
    }

    pub fn access(&self) -> &AccessRequirement {
        match self {
            NavNode::Item(item) => &item.access,
            NavNode::Group(group) => &group.access,
            NavNode::Title(title) => &title.access,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub items: Vec<NavNode>,
}
