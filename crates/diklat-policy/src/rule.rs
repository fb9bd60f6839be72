//! Policy document types.
//!
//! A `PolicyConfig` is deserialized from TOML and holds two tables:
//!
//! - `[[rules]]`: one explicit role allow-list per endpoint. Declaring an
//!   endpoint twice is a load error; an endpoint with no rule denies everyone.
//! - `[[rights]]`: the UI capability flags per resource and role.
//!
//! Role names go through `RoleName::normalize` while parsing, so a typo in a
//! role list is a load-time error rather than a silently dead entry.

use serde::{Deserialize, Serialize};

use diklat_contracts::{
    decision::Grant,
    resource::{Action, Endpoint, ResourceType},
    rights::AccessRights,
    role::RoleName,
};

/// The allow-list for a single endpoint.
///
/// Example in TOML:
/// ```toml
/// [[rules]]
/// id = "participant-update"
/// description = "Admins and unit operators edit participants; users edit themselves"
/// resource = "participant"
/// action = "update"
/// roles = ["super admin", "lcu"]
/// self_roles = ["user"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointRule {
    /// Stable identifier used in logs and error messages.
    pub id: String,

    /// Human-readable explanation of what this rule controls.
    #[serde(default)]
    pub description: String,

    pub resource: ResourceType,

    pub action: Action,

    /// Roles allowed on any row within their scope. Empty means nobody.
    #[serde(default)]
    pub roles: Vec<RoleName>,

    /// Roles allowed only on rows linked to their own participant.
    #[serde(default)]
    pub self_roles: Vec<RoleName>,
}

impl EndpointRule {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.resource, self.action)
    }

    /// Return true if this rule is declared for `endpoint`.
    pub fn matches(&self, endpoint: Endpoint) -> bool {
        self.resource == endpoint.resource && self.action == endpoint.action
    }

    /// The grant `role` receives under this rule, if any.
    ///
    /// Membership is checked literally; no role implies another.
    pub fn grant_for(&self, role: RoleName) -> Option<Grant> {
        if self.roles.contains(&role) {
            Some(Grant::Full)
        } else if self.self_roles.contains(&role) {
            Some(Grant::SelfOnly)
        } else {
            None
        }
    }
}

/// One row of the rights table. Unset flags are false.
///
/// Example in TOML:
/// ```toml
/// [[rights]]
/// resource = "participant"
/// role = "supervisor"
/// can_view = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightsEntry {
    pub resource: ResourceType,
    pub role: RoleName,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_print: bool,
}

impl RightsEntry {
    pub fn rights(&self) -> AccessRights {
        AccessRights {
            can_edit: self.can_edit,
            can_delete: self.can_delete,
            can_view: self.can_view,
            can_print: self.can_print,
        }
    }
}

/// The top-level structure deserialized from a TOML policy file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Endpoint allow-lists, at most one per endpoint.
    #[serde(default)]
    pub rules: Vec<EndpointRule>,

    /// Rights table entries. Each `(resource, role)` may appear once.
    #[serde(default)]
    pub rights: Vec<RightsEntry>,
}
