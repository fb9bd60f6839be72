//! # diklat-core
//!
//! The request-level access pipeline for the diklat training backend.
//!
//! This crate provides:
//! - The decision traits (`ActionAuthorizer`, `ScopeResolver`, `RightsProjector`)
//!   and the persistence seam (`Repository`)
//! - The `AccessGuard` that runs them in a fixed order for every request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diklat_core::{AccessGuard, traits::{ActionAuthorizer, ScopeResolver, RightsProjector}};
//! ```

pub mod guard;
pub mod traits;

pub use guard::AccessGuard;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use diklat_contracts::{
        actor::Actor,
        decision::Grant,
        envelope::PageRequest,
        error::{AccessError, AccessResult},
        resource::{Action, Endpoint, ResourceType},
        rights::AccessRights,
        role::RoleName,
        scope::{Predicate, ResourceScope, Scopable, ScopedQuery},
    };

    use crate::traits::{ActionAuthorizer, QueryPage, Repository, RightsProjector, ScopeResolver};

    use super::AccessGuard;

    // ── Mock helpers ──────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: String,
        unit: String,
        name: String,
    }

    impl Scopable for Person {
        fn id(&self) -> &str {
            &self.id
        }

        fn organizational_unit(&self) -> Option<&str> {
            Some(&self.unit)
        }

        fn is_linked_to(&self, participant_id: &str) -> bool {
            self.id == participant_id
        }

        fn searchable_text(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    fn person(id: &str, unit: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            unit: unit.to_string(),
            name: name.to_string(),
        }
    }

    struct MockRepo {
        rows: Vec<Person>,
        find_calls: Arc<Mutex<usize>>,
        get_calls: Arc<Mutex<usize>>,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                rows: vec![
                    person("p-1", "TA", "Andi"),
                    person("p-2", "TA", "Budi"),
                    person("p-3", "TB", "Citra"),
                ],
                find_calls: Arc::new(Mutex::new(0)),
                get_calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl Repository for MockRepo {
        type Record = Person;

        fn resource(&self) -> ResourceType {
            ResourceType::Participant
        }

        fn find(&self, query: &ScopedQuery, page: PageRequest) -> AccessResult<QueryPage<Person>> {
            *self.find_calls.lock().unwrap() += 1;
            let matched: Vec<Person> =
                self.rows.iter().filter(|r| query.matches(*r)).cloned().collect();
            let total = matched.len() as u64;
            Ok(QueryPage {
                rows: matched.into_iter().skip(page.offset()).take(page.limit()).collect(),
                total,
            })
        }

        fn get(&self, id: &str) -> AccessResult<Option<Person>> {
            *self.get_calls.lock().unwrap() += 1;
            Ok(self.rows.iter().find(|r| r.id == id).cloned())
        }
    }

    /// Allow-lists keyed by endpoint: (full roles, self-only roles).
    struct MockAuthorizer {
        rules: HashMap<Endpoint, (Vec<RoleName>, Vec<RoleName>)>,
    }

    impl ActionAuthorizer for MockAuthorizer {
        fn authorize(&self, actor: &Actor, endpoint: Endpoint) -> AccessResult<Grant> {
            let (full, own) = self.rules.get(&endpoint).cloned().unwrap_or_default();
            if full.contains(&actor.role()) {
                Ok(Grant::Full)
            } else if own.contains(&actor.role()) {
                Ok(Grant::SelfOnly)
            } else {
                Err(AccessError::Forbidden {
                    endpoint: endpoint.to_string(),
                    role: actor.role().to_string(),
                })
            }
        }
    }

    struct MockResolver;

    impl ScopeResolver for MockResolver {
        fn resolve(&self, actor: &Actor, _resource: ResourceType) -> AccessResult<ResourceScope> {
            Ok(match actor.role() {
                RoleName::SuperAdmin | RoleName::Supervisor => ResourceScope::Unscoped,
                RoleName::Lcu => ResourceScope::ByOrganizationalUnit(
                    actor.organizational_unit().unwrap_or_default().to_string(),
                ),
                RoleName::User => match actor.linked_participant_id() {
                    Some(id) => ResourceScope::SelfOnly(id.to_string()),
                    None => {
                        return Err(AccessError::MissingParticipantLink {
                            actor_id: actor.id().to_string(),
                            resource: "participant".to_string(),
                        })
                    }
                },
            })
        }
    }

    struct MockProjector;

    impl RightsProjector for MockProjector {
        fn project(&self, role: RoleName, _resource: ResourceType) -> AccessRights {
            match role {
                RoleName::SuperAdmin => AccessRights {
                    can_edit: true,
                    can_delete: true,
                    can_view: true,
                    can_print: false,
                },
                RoleName::Supervisor => AccessRights::view_only(),
                _ => AccessRights::default(),
            }
        }
    }

    fn make_guard() -> AccessGuard {
        use RoleName::*;
        let mut rules = HashMap::new();
        let ep = |a| Endpoint::new(ResourceType::Participant, a);
        rules.insert(ep(Action::List), (vec![SuperAdmin, Supervisor, Lcu, User], vec![]));
        rules.insert(ep(Action::Read), (vec![SuperAdmin, Supervisor, Lcu], vec![User]));
        rules.insert(ep(Action::Update), (vec![SuperAdmin, Lcu], vec![User]));
        rules.insert(ep(Action::Delete), (vec![SuperAdmin, Lcu], vec![]));
        rules.insert(ep(Action::Create), (vec![SuperAdmin, Lcu], vec![]));
        // Self-only for supervisors, so the scope intersection path is exercised.
        rules.insert(
            Endpoint::new(ResourceType::Participant, Action::Print),
            (vec![SuperAdmin], vec![Supervisor]),
        );

        AccessGuard::new(
            Box::new(MockAuthorizer { rules }),
            Box::new(MockResolver),
            Box::new(MockProjector),
        )
    }

    fn actor(role: RoleName, unit: Option<&str>, link: Option<&str>) -> Actor {
        Actor::new(
            "u-test",
            role,
            unit.map(str::to_string),
            link.map(str::to_string),
        )
        .unwrap()
    }

    fn ids(rows: &[Person]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    // ── Test cases ────────────────────────────────────────────────────────────

    /// Core security test: a denied endpoint must never reach the repository.
    #[test]
    fn test_denied_list_never_queries_repository() {
        let guard = AccessGuard::new(
            Box::new(MockAuthorizer { rules: HashMap::new() }),
            Box::new(MockResolver),
            Box::new(MockProjector),
        );
        let repo = MockRepo::new();
        let calls = repo.find_calls.clone();

        let result = guard.list(
            &actor(RoleName::SuperAdmin, None, None),
            &repo,
            None,
            PageRequest::default(),
        );

        assert!(matches!(result, Err(AccessError::Forbidden { .. })));
        assert_eq!(*calls.lock().unwrap(), 0, "find() must not run on a denied endpoint");
    }

    /// A failed scope resolution also stops before the repository.
    #[test]
    fn test_scope_failure_never_queries_repository() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let calls = repo.find_calls.clone();

        let result = guard.list(&actor(RoleName::User, None, None), &repo, None, PageRequest::default());

        assert!(matches!(result, Err(AccessError::MissingParticipantLink { .. })));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_list_applies_scope_and_rights() {
        let guard = make_guard();
        let repo = MockRepo::new();

        let body = guard
            .list(&actor(RoleName::Lcu, Some("TA"), None), &repo, None, PageRequest::default())
            .unwrap();

        assert_eq!(ids(&body.data), vec!["p-1", "p-2"]);
        assert_eq!(body.actions, AccessRights::default());
        assert_eq!(body.paging.total_page, 1);
        assert_eq!(body.paging.current_page, 1);
    }

    #[test]
    fn test_search_cannot_escape_scope() {
        let guard = make_guard();
        let repo = MockRepo::new();

        // "Citra" lives in TB; an lcu of TA searching for her gets nothing.
        let body = guard
            .list(
                &actor(RoleName::Lcu, Some("TA"), None),
                &repo,
                Some(Predicate::text("citra")),
                PageRequest::default(),
            )
            .unwrap();

        assert!(body.data.is_empty());
        assert_eq!(body.paging.total_page, 0);
    }

    #[test]
    fn test_list_paginates() {
        let guard = make_guard();
        let repo = MockRepo::new();

        let body = guard
            .list(
                &actor(RoleName::SuperAdmin, None, None),
                &repo,
                None,
                PageRequest::new(2, 2).unwrap(),
            )
            .unwrap();

        assert_eq!(ids(&body.data), vec!["p-3"]);
        assert_eq!(body.paging.total_page, 2);
        assert_eq!(body.paging.size, 2);
        assert!(body.actions.can_delete);
    }

    #[test]
    fn test_fetch_outside_scope_is_forbidden() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let lcu = actor(RoleName::Lcu, Some("TA"), None);

        assert_eq!(guard.fetch(&lcu, &repo, "p-1").unwrap().id, "p-1");
        assert!(matches!(
            guard.fetch(&lcu, &repo, "p-3"),
            Err(AccessError::Forbidden { .. })
        ));
        assert!(matches!(
            guard.fetch(&lcu, &repo, "p-404"),
            Err(AccessError::NotFound { .. })
        ));
    }

    #[test]
    fn test_denied_load_never_reads_repository() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let delete = Endpoint::new(ResourceType::Participant, Action::Delete);
        let user = Actor::new("u-1", RoleName::User, None, Some("p-1".to_string())).unwrap();

        // Same answer for an existing row and a missing one.
        for id in ["p-1", "no-such-id"] {
            match guard.load_for(&user, &repo, delete, id) {
                Err(AccessError::Forbidden { .. }) => {}
                other => panic!("expected Forbidden, got {:?}", other),
            }
        }
        assert_eq!(*repo.get_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_allowed_load_reports_missing_row() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let update = Endpoint::new(ResourceType::Participant, Action::Update);
        let lcu = Actor::new("u-2", RoleName::Lcu, Some("TA".to_string()), None).unwrap();

        match guard.load_for(&lcu, &repo, update, "no-such-id") {
            Err(AccessError::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(guard.load_for(&lcu, &repo, update, "p-2").unwrap().name, "Budi");
        assert!(guard.load_for(&lcu, &repo, update, "p-3").is_err());
        assert_eq!(*repo.get_calls.lock().unwrap(), 3);
    }

    #[test]
    fn test_self_only_grant_limits_to_own_record() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let user = actor(RoleName::User, None, Some("p-2"));

        assert_eq!(guard.fetch(&user, &repo, "p-2").unwrap().id, "p-2");
        assert!(matches!(
            guard.fetch(&user, &repo, "p-1"),
            Err(AccessError::Forbidden { .. })
        ));

        let own = repo.get("p-2").unwrap().unwrap();
        let other = repo.get("p-1").unwrap().unwrap();
        let update = Endpoint::new(ResourceType::Participant, Action::Update);
        assert!(guard.check_record(&user, update, &own).is_ok());
        assert!(guard.check_record(&user, update, &other).is_err());
    }

    #[test]
    fn test_self_only_grant_intersects_unscoped_query() {
        let guard = make_guard();
        // Supervisor resolves Unscoped, but its print grant is self-only.
        let supervisor = actor(RoleName::Supervisor, None, Some("p-3"));
        let print = Endpoint::new(ResourceType::Participant, Action::Print);

        let query = guard.query(&supervisor, print, None).unwrap();
        assert_eq!(
            query.scopes(),
            &[ResourceScope::Unscoped, ResourceScope::SelfOnly("p-3".to_string())]
        );

        let without_link = actor(RoleName::Supervisor, None, None);
        assert!(matches!(
            guard.query(&without_link, print, None),
            Err(AccessError::MissingParticipantLink { .. })
        ));
    }

    #[test]
    fn test_user_is_never_allowed_to_delete() {
        let guard = make_guard();
        let repo = MockRepo::new();
        let user = actor(RoleName::User, None, Some("p-1"));
        let own = repo.get("p-1").unwrap().unwrap();

        let result = guard.check_record(
            &user,
            Endpoint::new(ResourceType::Participant, Action::Delete),
            &own,
        );
        assert!(matches!(result, Err(AccessError::Forbidden { .. })));
    }

    #[test]
    fn test_create_stamps_lcu_unit() {
        let guard = make_guard();
        let lcu = actor(RoleName::Lcu, Some("TA"), None);

        assert_eq!(
            guard.authorize_create(&lcu, ResourceType::Participant, None).unwrap(),
            Some("TA".to_string())
        );
        assert_eq!(
            guard.authorize_create(&lcu, ResourceType::Participant, Some("TA")).unwrap(),
            Some("TA".to_string())
        );
        assert!(matches!(
            guard.authorize_create(&lcu, ResourceType::Participant, Some("TB")),
            Err(AccessError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_create_by_admin_requires_unit() {
        let guard = make_guard();
        let admin = actor(RoleName::SuperAdmin, None, None);

        assert_eq!(
            guard.authorize_create(&admin, ResourceType::Participant, Some(" TB ")).unwrap(),
            Some("TB".to_string())
        );
        assert!(matches!(
            guard.authorize_create(&admin, ResourceType::Participant, None),
            Err(AccessError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_authorize_is_deterministic() {
        let guard = make_guard();
        let lcu = actor(RoleName::Lcu, Some("TA"), None);
        let endpoint = Endpoint::new(ResourceType::Participant, Action::Delete);

        let first = guard.authorize(&lcu, endpoint).unwrap();
        for _ in 0..10 {
            assert_eq!(guard.authorize(&lcu, endpoint).unwrap(), first);
        }
    }
}
