//! Error types for the diklat access policy engine.
//!
//! All fallible operations return `AccessResult<T>`. The `Display` text of an
//! `AccessError` carries actor and endpoint detail for logs; what crosses the
//! HTTP boundary is `public_message()` wrapped in an `ErrorEnvelope`.

use thiserror::Error;

/// The unified error type for policy decisions and their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A raw role string did not normalize to any known role.
    #[error("unknown role '{raw}'")]
    UnknownRole { raw: String },

    /// The actor's role is not in the allowed set for the endpoint.
    #[error("role '{role}' is not permitted to call '{endpoint}'")]
    Forbidden { endpoint: String, role: String },

    /// An `lcu` actor arrived without an organizational unit.
    #[error("actor '{actor_id}' has role lcu but no organizational unit")]
    MissingOrganizationalUnit { actor_id: String },

    /// A `user` actor is not linked to a participant record.
    #[error("actor '{actor_id}' has no linked participant, required for '{resource}'")]
    MissingParticipantLink { actor_id: String, resource: String },

    /// The requested record does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// The caller supplied an unusable argument (page size, missing unit, ...).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The policy document is missing, malformed, or inconsistent.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The persistence collaborator failed.
    #[error("storage error: {reason}")]
    StorageError { reason: String },
}

impl AccessError {
    /// The HTTP status this error maps to at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::UnknownRole { .. } | AccessError::InvalidInput { .. } => 400,
            AccessError::Forbidden { .. }
            | AccessError::MissingOrganizationalUnit { .. }
            | AccessError::MissingParticipantLink { .. } => 403,
            AccessError::NotFound { .. } => 404,
            AccessError::ConfigError { .. } | AccessError::StorageError { .. } => 500,
        }
    }

    /// The message shown to API clients.
    ///
    /// Denials never reveal which role or endpoint was involved.
    pub fn public_message(&self) -> String {
        match self {
            AccessError::UnknownRole { .. } => "Role tidak dikenal".to_string(),
            AccessError::Forbidden { .. } => "Forbidden".to_string(),
            AccessError::MissingOrganizationalUnit { .. } => "Dinas tidak boleh kosong".to_string(),
            AccessError::MissingParticipantLink { .. } => {
                "Akun belum terhubung dengan participant".to_string()
            }
            AccessError::NotFound { resource, .. } => format!("{resource} tidak ditemukan"),
            AccessError::InvalidInput { reason } => reason.clone(),
            AccessError::ConfigError { .. } | AccessError::StorageError { .. } => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// True for every variant that should surface as 403.
    pub fn is_authorization_failure(&self) -> bool {
        self.status_code() == 403
    }
}

/// Convenience alias used throughout the diklat crates.
pub type AccessResult<T> = Result<T, AccessError>;
