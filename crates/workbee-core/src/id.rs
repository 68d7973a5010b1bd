//! Typed identifiers.
//!
//! Every identifier wraps a UUIDv7 so ids sort by creation time. Separate
//! newtypes keep a job id from being passed where a worker id is expected.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identifier of a job record.
    JobId
);

define_id!(
    /// Identifier of the business that owns job records.
    BusinessId
);

define_id!(
    /// Identifier of a worker profile.
    WorkerId
);

define_id!(
    /// Identifier of an account at the identity provider.
    UserId
);

impl UserId {
    /// The business identity of a business account.
    pub fn as_business(&self) -> BusinessId {
        BusinessId(self.0)
    }

    /// The worker identity of a worker account.
    pub fn as_worker(&self) -> WorkerId {
        WorkerId(self.0)
    }
}
