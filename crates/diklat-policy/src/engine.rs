//! TOML-driven action authorizer.
//!
//! `TomlActionAuthorizer` loads endpoint rules from a `PolicyConfig` and
//! implements the `ActionAuthorizer` trait from diklat-core.
//!
//! Evaluation algorithm:
//!
//! 1. Find the first rule declared for the requested endpoint.
//! 2. If the actor's role is in `roles` → `Grant::Full`.
//! 3. Else if it is in `self_roles` → `Grant::SelfOnly`.
//! 4. Otherwise, or if no rule exists → `Forbidden` (deny-by-default).

use std::path::Path;

use tracing::{debug, warn};

use diklat_contracts::{
    actor::Actor,
    decision::Grant,
    error::{AccessError, AccessResult},
    resource::Endpoint,
};
use diklat_core::traits::ActionAuthorizer;

use crate::rule::{EndpointRule, PolicyConfig};

/// An `ActionAuthorizer` backed by the `[[rules]]` table of a policy document.
///
/// ```rust,ignore
/// use diklat_policy::engine::TomlActionAuthorizer;
///
/// let authorizer = TomlActionAuthorizer::from_file(Path::new("policies/training.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct TomlActionAuthorizer {
    rules: Vec<EndpointRule>,
}

impl TomlActionAuthorizer {
    /// Build from an already parsed and validated config.
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            rules: config.rules.clone(),
        }
    }

    /// Parse `s` as a TOML policy document.
    ///
    /// Returns `AccessError::ConfigError` if the TOML is malformed, names an
    /// unknown role, or fails validation.
    pub fn from_toml_str(s: &str) -> AccessResult<Self> {
        let config = crate::loader::parse_policy(s)?;
        Ok(Self::from_config(&config))
    }

    /// Read the file at `path` and parse it as a TOML policy document.
    pub fn from_file(path: &Path) -> AccessResult<Self> {
        let config = crate::loader::read_policy(path)?;
        Ok(Self::from_config(&config))
    }

    /// The rule that governs `endpoint`, if one is declared.
    pub fn rule_for(&self, endpoint: Endpoint) -> Option<&EndpointRule> {
        self.rules.iter().find(|rule| rule.matches(endpoint))
    }

    pub fn rules(&self) -> &[EndpointRule] {
        &self.rules
    }
}

impl ActionAuthorizer for TomlActionAuthorizer {
    /// Look up the rule for `endpoint` and check the actor's role against it.
    ///
    /// A rule with empty `roles` and `self_roles`, or a missing rule, denies.
    fn authorize(&self, actor: &Actor, endpoint: Endpoint) -> AccessResult<Grant> {
        let role = actor.role();

        let Some(rule) = self.rule_for(endpoint) else {
            warn!(
                endpoint = %endpoint,
                role = %role,
                actor_id = %actor.id(),
                "no rule declared for endpoint; denying by default"
            );
            return Err(AccessError::Forbidden {
                endpoint: endpoint.to_string(),
                role: role.to_string(),
            });
        };

        match rule.grant_for(role) {
            Some(grant) => {
                debug!(
                    rule_id = %rule.id,
                    endpoint = %endpoint,
                    role = %role,
                    grant = ?grant,
                    "rule granted endpoint"
                );
                Ok(grant)
            }
            None => {
                warn!(
                    rule_id = %rule.id,
                    endpoint = %endpoint,
                    role = %role,
                    actor_id = %actor.id(),
                    "role not in endpoint allow-list"
                );
                Err(AccessError::Forbidden {
                    endpoint: endpoint.to_string(),
                    role: role.to_string(),
                })
            }
        }
    }
}
