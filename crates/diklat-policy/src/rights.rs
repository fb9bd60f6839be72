//! The rights table: one place for every role→flags mapping.

use std::collections::HashMap;

use diklat_contracts::{
    error::{AccessError, AccessResult},
    resource::ResourceType,
    rights::AccessRights,
    role::RoleName,
};
use diklat_core::traits::RightsProjector;

use crate::rule::PolicyConfig;

/// Immutable lookup from `(resource, role)` to `AccessRights`.
///
/// Loaded once at startup. Pairs the policy does not list project to
/// `AccessRights::default()`.
#[derive(Debug, Clone, Default)]
pub struct RightsTable {
    entries: HashMap<(ResourceType, RoleName), AccessRights>,
}

impl RightsTable {
    /// Build the table from the `[[rights]]` section of `config`.
    ///
    /// A `(resource, role)` pair listed twice is a `ConfigError`.
    pub fn from_config(config: &PolicyConfig) -> AccessResult<Self> {
        let mut entries = HashMap::new();
        for entry in &config.rights {
            if entries.insert((entry.resource, entry.role), entry.rights()).is_some() {
                return Err(AccessError::ConfigError {
                    reason: format!(
                        "rights for role '{}' on '{}' declared more than once",
                        entry.role, entry.resource
                    ),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RightsProjector for RightsTable {
    fn project(&self, role: RoleName, resource: ResourceType) -> AccessRights {
        self.entries
            .get(&(resource, role))
            .copied()
            .unwrap_or_default()
    }
}
