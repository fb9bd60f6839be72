//! The outcome of an allowed authorization check.

use serde::{Deserialize, Serialize};

/// How an action was allowed.
///
/// A denial is never a `Grant`; it is `AccessError::Forbidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    /// The role is on the endpoint's allow-list.
    Full,
    /// The role is allowed only on rows linked to the actor's own participant.
    SelfOnly,
}
