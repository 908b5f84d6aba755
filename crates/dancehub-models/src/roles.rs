//! Role and permission models.
//!
//! Wire shapes follow the backend's camelCase JSON. [`PermissionOverride`] is
//! the flattened domain form of the backend's override record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::PermissionId;

/// The four dashboard roles. Assigned by the backend, never changed here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Academy,
    Teacher,
    Dancer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Academy, Role::Teacher, Role::Dancer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Academy => "academy",
            Role::Teacher => "teacher",
            Role::Dancer => "dancer",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "academy" => Ok(Role::Academy),
            "teacher" => Ok(Role::Teacher),
            "dancer" => Ok(Role::Dancer),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Catalog entry as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: PermissionId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub module: String,
}

/// Catalog entries of one module, for grouped display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionModule {
    pub module: String,
    pub permissions: Vec<Permission>,
}

/// A per-user deviation from the role default for one code.
///
/// `granted = true` adds a code the role lacks, `granted = false` revokes one
/// the role has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverride {
    pub code: String,
    pub granted: bool,
}

impl PermissionOverride {
    pub fn grant(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            granted: true,
        }
    }

    pub fn revoke(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            granted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionRef {
    pub code: String,
}

/// Override record in the backend's nested shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OverrideRecord {
    pub permission: PermissionRef,
    pub granted: bool,
}

impl From<OverrideRecord> for PermissionOverride {
    fn from(record: OverrideRecord) -> Self {
        Self {
            code: record.permission.code,
            granted: record.granted,
        }
    }
}

/// Response of the backend's user permission detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionsDetail {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub role_permissions: Vec<Permission>,
    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,
}

impl UserPermissionsDetail {
    #[must_use]
    pub fn role_codes(&self) -> Vec<String> {
        self.role_permissions.iter().map(|p| p.code.clone()).collect()
    }

    #[must_use]
    pub fn domain_overrides(&self) -> Vec<PermissionOverride> {
        self.overrides.iter().cloned().map(Into::into).collect()
    }
}

fn validate_permission_codes(codes: &[String]) -> Result<(), ValidationError> {
    let malformed = codes.iter().any(|code| {
        code.split_once('.')
            .is_none_or(|(module, action)| module.is_empty() || action.is_empty())
    });

    if malformed {
        let mut err = ValidationError::new("permission_code");
        err.message = Some("Permission codes must have the form <module>.<action>".into());
        return Err(err);
    }
    Ok(())
}

/// Desired effective permission set for a user, forwarded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserPermissionsDto {
    pub role: Role,
    #[validate(
        length(max = 500, message = "Too many permission codes"),
        custom(function = "validate_permission_codes")
    )]
    pub permission_codes: Vec<String>,
}
