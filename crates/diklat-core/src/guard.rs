//! The access guard: the single entry point services call before touching data.
//!
//! Every operation runs in the same order:
//!
//!   Actor → Authorize → Resolve scope → Query / check record → Project rights
//!
//! The repository is never queried unless the authorizer has granted the
//! endpoint AND the scope resolved. Scope is always the outermost conjunct of
//! the query; caller predicates can only narrow it.

use tracing::{debug, warn};

use diklat_contracts::{
    actor::Actor,
    decision::Grant,
    envelope::{ListResponse, PageRequest, Paging},
    error::{AccessError, AccessResult},
    resource::{Action, Endpoint, ResourceType},
    rights::AccessRights,
    scope::{Predicate, ResourceScope, Scopable, ScopedQuery},
};

use crate::traits::{ActionAuthorizer, Repository, RightsProjector, ScopeResolver};

/// Owns the three trusted policy components for the lifetime of the process.
///
/// Built once at startup and shared by reference across requests. It holds
/// no per-request state.
pub struct AccessGuard {
    authorizer: Box<dyn ActionAuthorizer>,
    resolver: Box<dyn ScopeResolver>,
    projector: Box<dyn RightsProjector>,
}

impl AccessGuard {
    pub fn new(
        authorizer: Box<dyn ActionAuthorizer>,
        resolver: Box<dyn ScopeResolver>,
        projector: Box<dyn RightsProjector>,
    ) -> Self {
        Self { authorizer, resolver, projector }
    }

    /// Check the endpoint allow-list for `actor`.
    pub fn authorize(&self, actor: &Actor, endpoint: Endpoint) -> AccessResult<Grant> {
        debug!(
            request_id = %actor.request_id().0,
            actor_id = %actor.id(),
            role = %actor.role(),
            endpoint = %endpoint,
            "authorizing endpoint"
        );

        match self.authorizer.authorize(actor, endpoint) {
            Ok(grant) => Ok(grant),
            Err(err) => {
                warn!(
                    request_id = %actor.request_id().0,
                    actor_id = %actor.id(),
                    role = %actor.role(),
                    endpoint = %endpoint,
                    authenticated_at = %actor.authenticated_at(),
                    error = %err,
                    "endpoint denied"
                );
                Err(err)
            }
        }
    }

    /// Resolve the row scope for `actor` on `resource`.
    pub fn scope(&self, actor: &Actor, resource: ResourceType) -> AccessResult<ResourceScope> {
        match self.resolver.resolve(actor, resource) {
            Ok(scope) => {
                debug!(
                    request_id = %actor.request_id().0,
                    resource = %resource,
                    scope = %scope,
                    "scope resolved"
                );
                Ok(scope)
            }
            Err(err) => {
                warn!(
                    request_id = %actor.request_id().0,
                    actor_id = %actor.id(),
                    resource = %resource,
                    error = %err,
                    "scope resolution failed"
                );
                Err(err)
            }
        }
    }

    /// The capability flags for `actor` on `resource`.
    pub fn rights(&self, actor: &Actor, resource: ResourceType) -> AccessRights {
        self.projector.project(actor.role(), resource)
    }

    /// Build the scoped query an endpoint would run, without running it.
    ///
    /// A `SelfOnly` grant intersects the resolved scope with the actor's own
    /// participant link.
    pub fn query(
        &self,
        actor: &Actor,
        endpoint: Endpoint,
        search: Option<Predicate>,
    ) -> AccessResult<ScopedQuery> {
        let grant = self.authorize(actor, endpoint)?;
        let scope = self.scope(actor, endpoint.resource)?;
        let mut query = ScopedQuery::new(endpoint.resource, scope);
        if grant == Grant::SelfOnly {
            let link = participant_link(actor, endpoint.resource)?;
            query = query.within(ResourceScope::SelfOnly(link.to_string()));
        }
        Ok(query.and_maybe(search))
    }

    /// Serve a list endpoint.
    ///
    /// # Errors
    ///
    /// `Forbidden` if the role may not list the resource; the scope resolver's
    /// errors for malformed actors; whatever the repository returns.
    pub fn list<R: Repository>(
        &self,
        actor: &Actor,
        repo: &R,
        search: Option<Predicate>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<R::Record>> {
        let endpoint = Endpoint::new(repo.resource(), Action::List);
        let query = self.query(actor, endpoint, search)?;

        let result = repo.find(&query, page)?;
        debug!(
            request_id = %actor.request_id().0,
            endpoint = %endpoint,
            returned = result.rows.len(),
            total = result.total,
            "list served"
        );

        Ok(ListResponse {
            data: result.rows,
            actions: self.rights(actor, endpoint.resource),
            paging: Paging::new(page, result.total),
        })
    }

    /// Serve a read-by-id endpoint.
    ///
    /// A record outside the actor's scope is `Forbidden`; a missing one is
    /// `NotFound`.
    pub fn fetch<R: Repository>(&self, actor: &Actor, repo: &R, id: &str) -> AccessResult<R::Record> {
        self.load_for(actor, repo, Endpoint::new(repo.resource(), Action::Read), id)
    }

    /// Load the row `endpoint` will act on, for update, delete, and print.
    ///
    /// The role is authorized before the repository is touched, so a role
    /// outside the allow-list sees `Forbidden` whether or not `id` exists.
    pub fn load_for<R: Repository>(
        &self,
        actor: &Actor,
        repo: &R,
        endpoint: Endpoint,
        id: &str,
    ) -> AccessResult<R::Record> {
        let grant = self.authorize(actor, endpoint)?;

        let record = repo.get(id)?.ok_or_else(|| AccessError::NotFound {
            resource: endpoint.resource.to_string(),
            id: id.to_string(),
        })?;

        self.enforce_record(actor, endpoint, grant, &record)?;
        Ok(record)
    }

    /// Check that `actor` may run `endpoint` against an already loaded record.
    ///
    /// For records the caller obtained elsewhere. Rows read from a repository
    /// go through [`AccessGuard::load_for`] instead.
    pub fn check_record<T: Scopable + ?Sized>(
        &self,
        actor: &Actor,
        endpoint: Endpoint,
        record: &T,
    ) -> AccessResult<()> {
        let grant = self.authorize(actor, endpoint)?;
        self.enforce_record(actor, endpoint, grant, record)
    }

    /// Authorize a create and decide which unit the new row is stored under.
    ///
    /// `lcu` actors always create inside their own unit; asking for another
    /// unit is `Forbidden`. Other roles must name the unit for partitioned
    /// resources. Returns `None` for resources without a unit.
    pub fn authorize_create(
        &self,
        actor: &Actor,
        resource: ResourceType,
        requested_unit: Option<&str>,
    ) -> AccessResult<Option<String>> {
        let endpoint = Endpoint::new(resource, Action::Create);
        self.authorize(actor, endpoint)?;

        let requested = requested_unit.map(str::trim).filter(|u| !u.is_empty());
        if !resource.is_partitioned() {
            return Ok(requested.map(str::to_string));
        }

        match self.scope(actor, resource)? {
            ResourceScope::ByOrganizationalUnit(own) => match requested {
                Some(unit) if unit != own => {
                    warn!(
                        request_id = %actor.request_id().0,
                        actor_id = %actor.id(),
                        own_unit = %own,
                        requested_unit = %unit,
                        "create outside own unit refused"
                    );
                    Err(forbidden(actor, endpoint))
                }
                _ => Ok(Some(own)),
            },
            _ => requested
                .map(|u| Some(u.to_string()))
                .ok_or_else(|| AccessError::InvalidInput {
                    reason: "Dinas tidak boleh kosong".to_string(),
                }),
        }
    }

    fn enforce_record<T: Scopable + ?Sized>(
        &self,
        actor: &Actor,
        endpoint: Endpoint,
        grant: Grant,
        record: &T,
    ) -> AccessResult<()> {
        let scope = self.scope(actor, endpoint.resource)?;
        let in_scope = scope.permits(record)
            && match grant {
                Grant::Full => true,
                Grant::SelfOnly => record.is_linked_to(participant_link(actor, endpoint.resource)?),
            };

        if in_scope {
            Ok(())
        } else {
            warn!(
                request_id = %actor.request_id().0,
                actor_id = %actor.id(),
                endpoint = %endpoint,
                record_id = %record.id(),
                authenticated_at = %actor.authenticated_at(),
                "record outside actor scope"
            );
            Err(forbidden(actor, endpoint))
        }
    }
}

fn participant_link(actor: &Actor, resource: ResourceType) -> AccessResult<&str> {
    actor
        .linked_participant_id()
        .ok_or_else(|| AccessError::MissingParticipantLink {
            actor_id: actor.id().to_string(),
            resource: resource.to_string(),
        })
}

fn forbidden(actor: &Actor, endpoint: Endpoint) -> AccessError {
    AccessError::Forbidden {
        endpoint: endpoint.to_string(),
        role: actor.role().to_string(),
    }
}
