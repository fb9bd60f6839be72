//! Unit and participant partitioning.

use tracing::warn;

use diklat_contracts::{
    actor::Actor,
    error::{AccessError, AccessResult},
    resource::ResourceType,
    role::RoleName,
    scope::ResourceScope,
};
use diklat_core::traits::ScopeResolver;

/// The partitioning every partitioned resource follows:
///
/// | Role | Scope |
/// |------|-------|
/// | super admin, supervisor | `Unscoped` |
/// | lcu | `ByOrganizationalUnit(actor unit)` |
/// | user | `SelfOnly(linked participant)` |
///
/// Reference data (capabilities, signatures) is `Unscoped` for everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionScopeResolver;

impl ScopeResolver for PartitionScopeResolver {
    fn resolve(&self, actor: &Actor, resource: ResourceType) -> AccessResult<ResourceScope> {
        if !resource.is_partitioned() {
            return Ok(ResourceScope::Unscoped);
        }

        match actor.role() {
            RoleName::SuperAdmin | RoleName::Supervisor => Ok(ResourceScope::Unscoped),

            RoleName::Lcu => match actor.organizational_unit() {
                Some(unit) => Ok(ResourceScope::ByOrganizationalUnit(unit.to_string())),
                None => {
                    warn!(actor_id = %actor.id(), resource = %resource, "lcu actor has no unit");
                    Err(AccessError::MissingOrganizationalUnit {
                        actor_id: actor.id().to_string(),
                    })
                }
            },

            RoleName::User => match actor.linked_participant_id() {
                Some(id) => Ok(ResourceScope::SelfOnly(id.to_string())),
                None => {
                    warn!(
                        actor_id = %actor.id(),
                        resource = %resource,
                        "user actor has no linked participant"
                    );
                    Err(AccessError::MissingParticipantLink {
                        actor_id: actor.id().to_string(),
                        resource: resource.to_string(),
                    })
                }
            },
        }
    }
}
