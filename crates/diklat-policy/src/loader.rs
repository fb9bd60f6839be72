//! Loading policy documents and assembling the guard from them.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use diklat_contracts::error::{AccessError, AccessResult};
use diklat_core::AccessGuard;

use crate::{
    engine::TomlActionAuthorizer, rights::RightsTable, rule::PolicyConfig,
    scope::PartitionScopeResolver,
};

/// The policy compiled into the binary.
pub const BUILTIN_POLICY: &str = include_str!("../policies/training.toml");

/// Parse and validate a TOML policy document.
pub fn parse_policy(s: &str) -> AccessResult<PolicyConfig> {
    let config: PolicyConfig = toml::from_str(s).map_err(|e| AccessError::ConfigError {
        reason: format!("failed to parse policy TOML: {}", e),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Read and validate the policy file at `path`.
pub fn read_policy(path: &Path) -> AccessResult<PolicyConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| AccessError::ConfigError {
        reason: format!("failed to read policy file '{}': {}", path.display(), e),
    })?;
    parse_policy(&contents)
}

/// Wire the authorizer, the partition resolver, and the rights table into a guard.
pub fn guard_from_config(config: &PolicyConfig) -> AccessResult<AccessGuard> {
    let rights = RightsTable::from_config(config)?;
    info!(
        rules = config.rules.len(),
        rights = rights.len(),
        "access policy loaded"
    );
    Ok(AccessGuard::new(
        Box::new(TomlActionAuthorizer::from_config(config)),
        Box::new(PartitionScopeResolver),
        Box::new(rights),
    ))
}

pub fn guard_from_toml_str(s: &str) -> AccessResult<AccessGuard> {
    guard_from_config(&parse_policy(s)?)
}

pub fn guard_from_file(path: &Path) -> AccessResult<AccessGuard> {
    guard_from_config(&read_policy(path)?)
}

/// The guard for the built-in policy.
pub fn builtin_guard() -> AccessResult<AccessGuard> {
    guard_from_toml_str(BUILTIN_POLICY)
}

fn validate(config: &PolicyConfig) -> AccessResult<()> {
    let mut ids = HashSet::new();
    let mut endpoints = HashSet::new();
    for rule in &config.rules {
        if !ids.insert(rule.id.as_str()) {
            return Err(AccessError::ConfigError {
                reason: format!("rule id '{}' declared more than once", rule.id),
            });
        }
        if !endpoints.insert(rule.endpoint()) {
            return Err(AccessError::ConfigError {
                reason: format!(
                    "rule '{}' declares endpoint '{}' more than once",
                    rule.id,
                    rule.endpoint()
                ),
            });
        }
        if let Some(role) = rule.roles.iter().find(|r| rule.self_roles.contains(r)) {
            return Err(AccessError::ConfigError {
                reason: format!(
                    "rule '{}' lists role '{}' in both roles and self_roles",
                    rule.id, role
                ),
            });
        }
    }
    // Rejects duplicate (resource, role) rights entries.
    RightsTable::from_config(config).map(|_| ())
}
