//! The authenticated identity behind a request.
//!
//! An `Actor` is built once per request by the authentication layer and is
//! read-only afterwards. Its fields are private; policy code sees accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AccessError, AccessResult},
    role::RoleName,
};

/// Correlation id for one authenticated request.
///
/// Appears in every policy log line so a denial can be traced back to the
/// request that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the authentication collaborator knows after verifying a token.
///
/// The role is still free text here. Convert with `Actor::from_claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorClaims {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub organizational_unit: Option<String>,
    #[serde(default)]
    pub linked_participant_id: Option<String>,
}

/// The actor making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: String,
    role: RoleName,
    organizational_unit: Option<String>,
    linked_participant_id: Option<String>,
    request_id: RequestId,
    authenticated_at: DateTime<Utc>,
}

impl Actor {
    /// Build an actor from already-normalized parts.
    ///
    /// Blank unit or participant strings count as absent. An `lcu` actor
    /// without a unit is rejected with `MissingOrganizationalUnit`.
    pub fn new(
        id: impl Into<String>,
        role: RoleName,
        organizational_unit: Option<String>,
        linked_participant_id: Option<String>,
    ) -> AccessResult<Self> {
        let id = id.into();
        let organizational_unit = non_blank(organizational_unit);
        let linked_participant_id = non_blank(linked_participant_id);

        if role == RoleName::Lcu && organizational_unit.is_none() {
            return Err(AccessError::MissingOrganizationalUnit { actor_id: id });
        }

        Ok(Self {
            id,
            role,
            organizational_unit,
            linked_participant_id,
            request_id: RequestId::new(),
            authenticated_at: Utc::now(),
        })
    }

    /// Normalize the raw role in `claims` and build the actor.
    pub fn from_claims(claims: ActorClaims) -> AccessResult<Self> {
        let role = RoleName::normalize(&claims.role)?;
        Self::new(
            claims.id,
            role,
            claims.organizational_unit,
            claims.linked_participant_id,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> RoleName {
        self.role
    }

    /// The actor's unit ("dinas"), if any. Always present for `lcu`.
    pub fn organizational_unit(&self) -> Option<&str> {
        self.organizational_unit.as_deref()
    }

    /// The participant this account belongs to, if any.
    pub fn linked_participant_id(&self) -> Option<&str> {
        self.linked_participant_id.as_deref()
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
