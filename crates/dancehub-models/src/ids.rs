//! Strongly-typed ID newtypes for backend entities.
//!
//! Each wrapper prevents mixing identifiers of different entities, e.g.
//! passing an `AcademyId` where an `EventId` is expected when building a
//! backend URL.
//!
//! # Example
//!
//! ```ignore
//! use dancehub_models::ids::{AcademyId, EventId};
//!
//! fn registration_path(event: EventId, academy: AcademyId) -> String {
//!     format!("/events/{event}/academies/{academy}")
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Create an ID from a u128 value (useful for fixtures).
            #[inline]
            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for dashboard users.
    UserId
);

define_id!(
    /// Strongly-typed ID for academies.
    AcademyId
);

define_id!(
    /// Strongly-typed ID for events.
    EventId
);

define_id!(
    /// Strongly-typed ID for permission catalog entries.
    PermissionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(EventId::from_uuid(uuid).into_inner(), uuid);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id = AcademyId::from_u128(7);
        let parsed: AcademyId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<AcademyId>().is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = UserId::from_u128(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_debug_names_the_entity() {
        let id = EventId::from_u128(1);
        assert!(format!("{id:?}").starts_with("EventId("));
    }
}
