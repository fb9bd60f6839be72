//! UI-facing capability flags attached to list responses.

use serde::{Deserialize, Serialize};

/// What the client may offer the actor for rows of one resource type.
///
/// Derived from `(role, resource)` alone, never from the row itself.
/// `Default` is the all-false fallback for unmapped pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRights {
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_print: bool,
}

impl AccessRights {
    /// All flags false.
    pub const NONE: AccessRights = AccessRights {
        can_edit: false,
        can_delete: false,
        can_view: false,
        can_print: false,
    };

    pub fn view_only() -> Self {
        Self {
            can_view: true,
            ..Self::NONE
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}
