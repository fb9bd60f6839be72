//! Core trait definitions for the diklat access pipeline.
//!
//! Three trusted, pure decision components and one collaborator seam:
//!
//! - `ActionAuthorizer`: allow/deny per endpoint, from explicit role lists
//! - `ScopeResolver`: which rows of a resource the actor may see
//! - `RightsProjector`: UI capability flags per role and resource
//! - `Repository`: the persistence collaborator executing scoped queries
//!
//! `AccessGuard` wires them together. Service code receives the guard as an
//! explicit argument; nothing here reads ambient request state.

use diklat_contracts::{
    actor::Actor,
    decision::Grant,
    envelope::PageRequest,
    error::AccessResult,
    resource::{Endpoint, ResourceType},
    rights::AccessRights,
    role::RoleName,
    scope::{ResourceScope, Scopable, ScopedQuery},
};

/// Decides whether an actor may call an endpoint.
///
/// Implementations must be deterministic and side-effect free. An endpoint
/// with no declared roles denies every actor.
pub trait ActionAuthorizer: Send + Sync {
    /// Return the grant for `actor` on `endpoint`, or `AccessError::Forbidden`.
    fn authorize(&self, actor: &Actor, endpoint: Endpoint) -> AccessResult<Grant>;
}

/// Computes the row filter for an actor on a resource type.
pub trait ScopeResolver: Send + Sync {
    /// Resolve the scope. Fails with `MissingOrganizationalUnit` or
    /// `MissingParticipantLink` when the actor lacks the attribute its role
    /// is partitioned by.
    fn resolve(&self, actor: &Actor, resource: ResourceType) -> AccessResult<ResourceScope>;
}

/// Maps a role and resource type to static access flags.
///
/// Never fails: unmapped pairs yield `AccessRights::default()`.
pub trait RightsProjector: Send + Sync {
    fn project(&self, role: RoleName, resource: ResourceType) -> AccessRights;
}

/// One page of query results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

/// The persistence collaborator for one resource type.
///
/// `find` must apply every scope and filter in the query; the guard never
/// post-filters rows it receives.
pub trait Repository: Send + Sync {
    type Record: Scopable;

    /// The resource type this repository serves.
    fn resource(&self) -> ResourceType;

    /// Execute a scoped query and return the requested page.
    fn find(&self, query: &ScopedQuery, page: PageRequest) -> AccessResult<QueryPage<Self::Record>>;

    /// Load one record by id, ignoring scope. The guard checks scope after.
    fn get(&self, id: &str) -> AccessResult<Option<Self::Record>>;
}
