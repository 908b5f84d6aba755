//! Helpers for the per-user permission editor.

use std::collections::{BTreeMap, BTreeSet};

use dancehub_core::permissions::module_of;
use dancehub_models::PermissionOverride;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flips the effective state of `code`.
///
/// An existing override is removed, which restores the role default. With no
/// override present, one opposite to the role default is appended. Toggling
/// the same code twice returns the original list.
#[must_use]
pub fn toggle_override(
    role_defaults: &BTreeSet<String>,
    overrides: &[PermissionOverride],
    code: &str,
) -> Vec<PermissionOverride> {
    if overrides.iter().any(|o| o.code == code) {
        return overrides.iter().filter(|o| o.code != code).cloned().collect();
    }

    let mut next = overrides.to_vec();
    next.push(PermissionOverride {
        code: code.to_string(),
        granted: !role_defaults.contains(code),
    });
    next
}

/// Minimal override list turning `role_defaults` into `desired`, sorted by code.
#[must_use]
pub fn overrides_for(
    role_defaults: &BTreeSet<String>,
    desired: &BTreeSet<String>,
) -> Vec<PermissionOverride> {
    let grants = desired
        .difference(role_defaults)
        .map(|code| PermissionOverride::grant(code.clone()));
    let revokes = role_defaults
        .difference(desired)
        .map(|code| PermissionOverride::revoke(code.clone()));

    let mut list: Vec<_> = grants.chain(revokes).collect();
    list.sort_by(|a, b| a.code.cmp(&b.code));
    list
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModuleGroup {
    pub module: String,
    pub codes: Vec<String>,
}

/// Groups codes by module; modules and codes come out sorted.
#[must_use]
pub fn group_by_module<'a, I>(codes: I) -> Vec<ModuleGroup>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for code in codes {
        groups
            .entry(module_of(code))
            .or_default()
            .insert(code.as_str());
    }

    groups
        .into_iter()
        .map(|(module, codes)| ModuleGroup {
            module: module.to_string(),
            codes: codes.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
