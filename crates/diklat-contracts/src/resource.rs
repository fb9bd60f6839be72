//! Resource types, actions, and the endpoints formed from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};

/// A category of persisted entity that policy is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Participant,
    User,
    /// A training session, called "COT" throughout the application.
    #[serde(rename = "cot")]
    TrainingSession,
    Certificate,
    Capability,
    Signature,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Participant,
        ResourceType::User,
        ResourceType::TrainingSession,
        ResourceType::Certificate,
        ResourceType::Capability,
        ResourceType::Signature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Participant => "participant",
            ResourceType::User => "user",
            ResourceType::TrainingSession => "cot",
            ResourceType::Certificate => "certificate",
            ResourceType::Capability => "capability",
            ResourceType::Signature => "signature",
        }
    }

    /// Parse a wire name. `"training_session"` is accepted as an alias of `"cot"`.
    pub fn parse(raw: &str) -> AccessResult<Self> {
        match raw.trim().to_lowercase().as_str() {
            "participant" => Ok(ResourceType::Participant),
            "user" => Ok(ResourceType::User),
            "cot" | "training_session" => Ok(ResourceType::TrainingSession),
            "certificate" => Ok(ResourceType::Certificate),
            "capability" => Ok(ResourceType::Capability),
            "signature" => Ok(ResourceType::Signature),
            other => Err(AccessError::InvalidInput {
                reason: format!("unknown resource type '{other}'"),
            }),
        }
    }

    /// True if rows of this type are partitioned by unit and participant link.
    ///
    /// Reference data (capabilities, signatures) is visible to anyone the
    /// authorizer lets through.
    pub fn is_partitioned(&self) -> bool {
        matches!(
            self,
            ResourceType::Participant
                | ResourceType::User
                | ResourceType::TrainingSession
                | ResourceType::Certificate
        )
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation an endpoint performs on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
    /// Render a certificate or ID card as PDF.
    Print,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Print => "print",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(resource, action)` pair; the unit an allow-list is declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub resource: ResourceType,
    pub action: Action,
}

impl Endpoint {
    pub fn new(resource: ResourceType, action: Action) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}
