//! # diklat-contracts
//!
//! Shared types, wire envelopes, and error contracts for the diklat access
//! policy engine.
//!
//! All crates in the workspace import from here. No policy decisions are made
//! in this crate: only data definitions, scope evaluation, and error types.

pub mod actor;
pub mod decision;
pub mod envelope;
pub mod error;
pub mod resource;
pub mod rights;
pub mod role;
pub mod scope;

pub use actor::{Actor, ActorClaims, RequestId};
pub use decision::Grant;
pub use envelope::{ErrorEnvelope, ListResponse, PageRequest, Paging};
pub use error::{AccessError, AccessResult};
pub use resource::{Action, Endpoint, ResourceType};
pub use rights::AccessRights;
pub use role::RoleName;
pub use scope::{Predicate, ResourceScope, Scopable, ScopedQuery};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Fixtures ─────────────────────────────────────────────────────────────

    struct Row {
        id: &'static str,
        unit: Option<&'static str>,
        name: &'static str,
        city: &'static str,
    }

    impl Scopable for Row {
        fn id(&self) -> &str {
            self.id
        }

        fn organizational_unit(&self) -> Option<&str> {
            self.unit
        }

        fn is_linked_to(&self, participant_id: &str) -> bool {
            self.id == participant_id
        }

        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "city" => Some(self.city),
                _ => None,
            }
        }

        fn searchable_text(&self) -> Vec<&str> {
            vec![self.name, self.city]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "p-1", unit: Some("TA"), name: "Andi", city: "Jakarta" },
            Row { id: "p-2", unit: Some("TA"), name: "Budi", city: "Bandung" },
            Row { id: "p-3", unit: Some("TB"), name: "Citra", city: "Jakarta" },
            Row { id: "p-4", unit: None, name: "Dewi", city: "Medan" },
        ]
    }

    fn ids(query: &ScopedQuery) -> Vec<&'static str> {
        rows().iter().filter(|r| query.matches(*r)).map(|r| r.id).collect()
    }

    // ── RoleName ─────────────────────────────────────────────────────────────

    #[test]
    fn role_normalize_ignores_case_and_whitespace() {
        assert_eq!(RoleName::normalize("Super Admin").unwrap(), RoleName::SuperAdmin);
        assert_eq!(RoleName::normalize("  SUPERVISOR ").unwrap(), RoleName::Supervisor);
        assert_eq!(RoleName::normalize("LCU").unwrap(), RoleName::Lcu);
        assert_eq!(RoleName::normalize("user").unwrap(), RoleName::User);
        assert_eq!(RoleName::normalize("super_admin").unwrap(), RoleName::SuperAdmin);
    }

    #[test]
    fn role_normalize_rejects_unknown_names() {
        match RoleName::normalize("admin") {
            Err(AccessError::UnknownRole { raw }) => assert_eq!(raw, "admin"),
            other => panic!("expected UnknownRole, got {:?}", other),
        }
        assert!(RoleName::normalize("").is_err());
    }

    #[test]
    fn role_canonical_names_round_trip() {
        for role in RoleName::ALL {
            assert_eq!(RoleName::normalize(role.as_str()).unwrap(), role);
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
    }

    #[test]
    fn role_serde_uses_canonical_name() {
        assert_eq!(serde_json::to_value(RoleName::SuperAdmin).unwrap(), json!("super admin"));
        let parsed: RoleName = serde_json::from_value(json!("Supervisor")).unwrap();
        assert_eq!(parsed, RoleName::Supervisor);
        assert!(serde_json::from_value::<RoleName>(json!("root")).is_err());
    }

    #[test]
    fn role_rank_is_strictly_descending() {
        let ranks: Vec<u8> = RoleName::ALL.iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![4, 3, 2, 1]);
    }

    // ── Actor ────────────────────────────────────────────────────────────────

    #[test]
    fn lcu_actor_without_unit_is_rejected() {
        match Actor::new("u-1", RoleName::Lcu, None, None) {
            Err(AccessError::MissingOrganizationalUnit { actor_id }) => assert_eq!(actor_id, "u-1"),
            other => panic!("expected MissingOrganizationalUnit, got {:?}", other),
        }
    }

    #[test]
    fn blank_unit_counts_as_missing() {
        let result = Actor::new("u-1", RoleName::Lcu, Some("   ".to_string()), None);
        assert!(matches!(result, Err(AccessError::MissingOrganizationalUnit { .. })));

        let user = Actor::new("u-2", RoleName::User, None, Some("".to_string())).unwrap();
        assert_eq!(user.linked_participant_id(), None);
    }

    #[test]
    fn actor_from_claims_normalizes_role() {
        let claims: ActorClaims = serde_json::from_value(json!({
            "id": "u-9",
            "role": "LCU",
            "organizationalUnit": "TA"
        }))
        .unwrap();
        let actor = Actor::from_claims(claims).unwrap();
        assert_eq!(actor.role(), RoleName::Lcu);
        assert_eq!(actor.organizational_unit(), Some("TA"));
        assert_eq!(actor.linked_participant_id(), None);
    }

    #[test]
    fn actor_from_claims_with_unknown_role_fails() {
        let claims = ActorClaims {
            id: "u-9".to_string(),
            role: "operator".to_string(),
            organizational_unit: None,
            linked_participant_id: None,
        };
        assert!(matches!(
            Actor::from_claims(claims),
            Err(AccessError::UnknownRole { .. })
        ));
    }

    #[test]
    fn each_actor_gets_its_own_request_id() {
        let a = Actor::new("u-1", RoleName::SuperAdmin, None, None).unwrap();
        let b = Actor::new("u-1", RoleName::SuperAdmin, None, None).unwrap();
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn actor_records_authentication_time() {
        let before = chrono::Utc::now();
        let actor = Actor::new("u-1", RoleName::Supervisor, None, None).unwrap();
        let after = chrono::Utc::now();
        assert!(actor.authenticated_at() >= before && actor.authenticated_at() <= after);
    }

    // ── Scope ────────────────────────────────────────────────────────────────

    #[test]
    fn unscoped_returns_every_row() {
        let query = ScopedQuery::new(ResourceType::Participant, ResourceScope::Unscoped);
        assert_eq!(ids(&query), vec!["p-1", "p-2", "p-3", "p-4"]);
    }

    #[test]
    fn unit_scope_returns_only_matching_unit() {
        let query = ScopedQuery::new(
            ResourceType::Participant,
            ResourceScope::ByOrganizationalUnit("TA".to_string()),
        );
        assert_eq!(ids(&query), vec!["p-1", "p-2"]);
    }

    #[test]
    fn self_scope_returns_at_most_one_row() {
        let hit = ScopedQuery::new(ResourceType::Participant, ResourceScope::SelfOnly("p-3".into()));
        assert_eq!(ids(&hit), vec!["p-3"]);

        let miss = ScopedQuery::new(ResourceType::Participant, ResourceScope::SelfOnly("p-99".into()));
        assert!(ids(&miss).is_empty());
    }

    #[test]
    fn caller_filters_never_widen_scope() {
        // An Any() that would match rows from every unit is still confined to TA.
        let widening = Predicate::Any(vec![
            Predicate::field_equals("city", "Jakarta"),
            Predicate::text("Citra"),
            Predicate::text("Dewi"),
        ]);
        let query = ScopedQuery::new(
            ResourceType::Participant,
            ResourceScope::ByOrganizationalUnit("TA".to_string()),
        )
        .and(widening);

        assert_eq!(ids(&query), vec!["p-1"]);
    }

    #[test]
    fn intersected_scopes_must_all_hold() {
        let query = ScopedQuery::new(
            ResourceType::Participant,
            ResourceScope::ByOrganizationalUnit("TA".to_string()),
        )
        .within(ResourceScope::SelfOnly("p-3".to_string()));
        // p-3 is in TB, so the intersection is empty.
        assert!(ids(&query).is_empty());
        assert_eq!(query.scopes().len(), 2);

        let unchanged = ScopedQuery::new(ResourceType::Participant, ResourceScope::Unscoped)
            .within(ResourceScope::Unscoped);
        assert!(unchanged.is_unscoped());
    }

    #[test]
    fn search_is_case_insensitive_and_blank_matches_all() {
        let query = ScopedQuery::new(ResourceType::Participant, ResourceScope::Unscoped)
            .and(Predicate::text("jakarta"));
        assert_eq!(ids(&query), vec!["p-1", "p-3"]);

        let blank = ScopedQuery::new(ResourceType::Participant, ResourceScope::Unscoped)
            .and_maybe(Some(Predicate::text("  ")));
        assert_eq!(ids(&blank).len(), 4);
    }

    #[test]
    fn empty_combinators_follow_boolean_identity() {
        let data = rows();
        let row = &data[0];
        assert!(Predicate::All(vec![]).matches(row));
        assert!(!Predicate::Any(vec![]).matches(row));
    }

    #[test]
    fn scope_serializes_as_tagged_descriptor() {
        let scope = ResourceScope::ByOrganizationalUnit("TA".to_string());
        assert_eq!(
            serde_json::to_value(&scope).unwrap(),
            json!({ "kind": "by_organizational_unit", "value": "TA" })
        );
        assert_eq!(scope.to_string(), "unit = 'TA'");
    }

    // ── Envelopes ────────────────────────────────────────────────────────────

    #[test]
    fn list_response_wire_shape() {
        let body = ListResponse {
            data: vec![json!({ "id": "p-1" })],
            actions: AccessRights {
                can_edit: true,
                can_delete: false,
                can_view: true,
                can_print: false,
            },
            paging: Paging::new(PageRequest::new(2, 10).unwrap(), 25),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "data": [{ "id": "p-1" }],
                "actions": {
                    "canEdit": true,
                    "canDelete": false,
                    "canView": true,
                    "canPrint": false
                },
                "paging": { "currentPage": 2, "totalPage": 3, "size": 10 }
            })
        );
    }

    #[test]
    fn paging_math() {
        assert_eq!(Paging::new(PageRequest::default(), 0).total_page, 0);
        assert_eq!(Paging::new(PageRequest::default(), 10).total_page, 1);
        assert_eq!(Paging::new(PageRequest::default(), 11).total_page, 2);

        let page = PageRequest::new(0, 5).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(PageRequest::new(3, 5).unwrap().offset(), 10);
        assert!(matches!(PageRequest::new(1, 0), Err(AccessError::InvalidInput { .. })));
    }

    #[test]
    fn page_request_deserializes_through_validation() {
        assert!(serde_json::from_value::<PageRequest>(json!({ "page": 1, "size": 0 })).is_err());

        let zero: PageRequest = serde_json::from_value(json!({ "page": 0, "size": 10 })).unwrap();
        assert_eq!(zero.page(), 1);
        assert_eq!(zero.offset(), 0);

        let defaults: PageRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(defaults, PageRequest::default());
    }

    #[test]
    fn huge_page_offset_saturates() {
        let far = PageRequest::new(u64::MAX, 10).unwrap();
        assert_eq!(far.offset(), usize::MAX);
        assert_eq!(Paging::new(far, 25).total_page, 3);
        assert_eq!(PageRequest::new(1, u64::MAX).unwrap().limit(), usize::MAX);
    }

    #[test]
    fn rights_default_is_all_false() {
        assert!(AccessRights::default().is_none());
        assert!(AccessRights::view_only().can_view);
        assert!(!AccessRights::view_only().can_edit);
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn error_status_codes() {
        let forbidden = AccessError::Forbidden {
            endpoint: "participant.delete".to_string(),
            role: "user".to_string(),
        };
        assert_eq!(forbidden.status_code(), 403);
        assert!(forbidden.is_authorization_failure());
        assert_eq!(AccessError::UnknownRole { raw: "x".into() }.status_code(), 400);
        assert_eq!(
            AccessError::MissingParticipantLink { actor_id: "u".into(), resource: "participant".into() }
                .status_code(),
            403
        );
        assert_eq!(AccessError::ConfigError { reason: "x".into() }.status_code(), 500);
    }

    #[test]
    fn error_envelope_hides_internal_detail() {
        let err = AccessError::Forbidden {
            endpoint: "participant.delete".to_string(),
            role: "user".to_string(),
        };
        assert!(err.to_string().contains("participant.delete"));

        let envelope = ErrorEnvelope::from(&err);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": 403, "status": "Forbidden", "errors": "Forbidden" })
        );
    }

    #[test]
    fn missing_unit_envelope_is_localized() {
        let envelope: ErrorEnvelope =
            AccessError::MissingOrganizationalUnit { actor_id: "u-1".into() }.into();
        assert_eq!(envelope.code, 403);
        assert_eq!(envelope.errors, "Dinas tidak boleh kosong");
    }

    #[test]
    fn resource_wire_names() {
        assert_eq!(serde_json::to_value(ResourceType::TrainingSession).unwrap(), json!("cot"));
        assert_eq!(ResourceType::parse("training_session").unwrap(), ResourceType::TrainingSession);
        assert_eq!(
            Endpoint::new(ResourceType::Participant, Action::Delete).to_string(),
            "participant.delete"
        );
        assert!(!ResourceType::Capability.is_partitioned());
        assert!(ResourceType::Certificate.is_partitioned());
    }
}
