//! The closed set of roles an actor can hold.
//!
//! Roles are persisted as free text upstream. They are normalized exactly once,
//! when the actor context is built, and compared as enum values from then on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};

/// One of the four roles known to the system.
///
/// `rank()` orders them for display only. Authorization never consults it:
/// every endpoint lists its allowed roles explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoleName {
    SuperAdmin,
    Supervisor,
    Lcu,
    User,
}

impl RoleName {
    /// Every role, highest rank first.
    pub const ALL: [RoleName; 4] = [
        RoleName::SuperAdmin,
        RoleName::Supervisor,
        RoleName::Lcu,
        RoleName::User,
    ];

    /// Resolve a raw role name, ignoring case and surrounding whitespace.
    ///
    /// Returns `AccessError::UnknownRole` when nothing matches.
    pub fn normalize(raw: &str) -> AccessResult<Self> {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "super admin" | "superadmin" | "super_admin" => Ok(RoleName::SuperAdmin),
            "supervisor" => Ok(RoleName::Supervisor),
            "lcu" => Ok(RoleName::Lcu),
            "user" => Ok(RoleName::User),
            _ => Err(AccessError::UnknownRole {
                raw: raw.to_string(),
            }),
        }
    }

    /// Canonical lower-case name, as stored in the user table.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::SuperAdmin => "super admin",
            RoleName::Supervisor => "supervisor",
            RoleName::Lcu => "lcu",
            RoleName::User => "user",
        }
    }

    /// Informational rank: 4 for super admin down to 1 for user.
    pub fn rank(&self) -> u8 {
        match self {
            RoleName::SuperAdmin => 4,
            RoleName::Supervisor => 3,
            RoleName::Lcu => 2,
            RoleName::User => 1,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for RoleName {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        role.as_str().to_string()
    }
}
