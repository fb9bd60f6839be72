//! Request handlers for the training backend, served through `AccessGuard`.
//!
//! Each method takes the request's `Actor` explicitly. No method reads role,
//! unit, or participant link from anywhere else, and none touches a store
//! before the guard has cleared the call.

use serde::{Deserialize, Serialize};
use tracing::info;

use diklat_contracts::{
    actor::Actor,
    envelope::{ListResponse, PageRequest},
    error::{AccessError, AccessResult},
    resource::{Action, Endpoint, ResourceType},
    scope::{Predicate, Scopable},
};
use diklat_core::{traits::Repository, AccessGuard};

use crate::{
    mock_data,
    records::{Capability, Certificate, Participant, TrainingSession, UserAccount},
    store::InMemoryRepository,
};

/// Fields accepted when registering a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub name: String,
    pub email: String,
    pub nik: String,
    pub company: String,
    /// Ignored for lcu actors, who always register into their own unit.
    pub dinas: Option<String>,
}

/// Editable participant fields. The unit is not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

/// A cleared request to render a document.
///
/// The PDF renderer consumes this; it is only ever produced after the guard
/// has authorized the print and checked the record's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTicket {
    pub resource: ResourceType,
    pub record_id: String,
    pub requested_by: String,
}

/// The training backend's stores plus the guard protecting them.
pub struct TrainingService {
    guard: AccessGuard,
    participants: InMemoryRepository<Participant>,
    sessions: InMemoryRepository<TrainingSession>,
    users: InMemoryRepository<UserAccount>,
    certificates: InMemoryRepository<Certificate>,
    capabilities: InMemoryRepository<Capability>,
}

impl TrainingService {
    /// A service over the fictional data set in `mock_data`.
    pub fn with_mock_data(guard: AccessGuard) -> Self {
        Self {
            guard,
            participants: InMemoryRepository::new(ResourceType::Participant, mock_data::participants()),
            sessions: InMemoryRepository::new(ResourceType::TrainingSession, mock_data::training_sessions()),
            users: InMemoryRepository::new(ResourceType::User, mock_data::user_accounts()),
            certificates: InMemoryRepository::new(ResourceType::Certificate, mock_data::certificates()),
            capabilities: InMemoryRepository::new(ResourceType::Capability, mock_data::capabilities()),
        }
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    // ── Participants ─────────────────────────────────────────────────────────

    pub fn list_participants(
        &self,
        actor: &Actor,
        search: Option<&str>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<Participant>> {
        self.guard.list(actor, &self.participants, search.map(Predicate::text), page)
    }

    pub fn get_participant(&self, actor: &Actor, id: &str) -> AccessResult<Participant> {
        self.guard.fetch(actor, &self.participants, id)
    }

    pub fn create_participant(&self, actor: &Actor, input: NewParticipant) -> AccessResult<Participant> {
        let dinas = self
            .guard
            .authorize_create(actor, ResourceType::Participant, input.dinas.as_deref())?
            .ok_or_else(|| AccessError::InvalidInput {
                reason: "Dinas tidak boleh kosong".to_string(),
            })?;

        if input.name.trim().is_empty() {
            return Err(AccessError::InvalidInput {
                reason: "Nama tidak boleh kosong".to_string(),
            });
        }

        let participant = Participant {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            email: input.email,
            nik: input.nik,
            dinas,
            company: input.company,
        };
        self.participants.insert(participant.clone())?;

        info!(
            request_id = %actor.request_id().0,
            participant_id = %participant.id,
            dinas = %participant.dinas,
            "participant registered"
        );
        Ok(participant)
    }

    pub fn update_participant(
        &self,
        actor: &Actor,
        id: &str,
        changes: ParticipantUpdate,
    ) -> AccessResult<Participant> {
        let mut participant = self.guard.load_for(
            actor,
            &self.participants,
            Endpoint::new(ResourceType::Participant, Action::Update),
            id,
        )?;

        if let Some(name) = changes.name {
            participant.name = name;
        }
        if let Some(email) = changes.email {
            participant.email = email;
        }
        if let Some(company) = changes.company {
            participant.company = company;
        }
        self.participants.replace(participant.clone())?;
        Ok(participant)
    }

    pub fn delete_participant(&self, actor: &Actor, id: &str) -> AccessResult<Participant> {
        self.guard.load_for(
            actor,
            &self.participants,
            Endpoint::new(ResourceType::Participant, Action::Delete),
            id,
        )?;
        let removed = self.participants.remove(id)?;

        info!(
            request_id = %actor.request_id().0,
            participant_id = %id,
            "participant deleted"
        );
        Ok(removed)
    }

    /// Clear an ID-card print for a participant.
    pub fn print_id_card(&self, actor: &Actor, participant_id: &str) -> AccessResult<PrintTicket> {
        self.print(actor, &self.participants, participant_id)
    }

    // ── Training sessions ────────────────────────────────────────────────────

    pub fn list_training_sessions(
        &self,
        actor: &Actor,
        search: Option<&str>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<TrainingSession>> {
        self.guard.list(actor, &self.sessions, search.map(Predicate::text), page)
    }

    pub fn get_training_session(&self, actor: &Actor, id: &str) -> AccessResult<TrainingSession> {
        self.guard.fetch(actor, &self.sessions, id)
    }

    // ── Users ────────────────────────────────────────────────────────────────

    pub fn list_users(
        &self,
        actor: &Actor,
        search: Option<&str>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<UserAccount>> {
        self.guard.list(actor, &self.users, search.map(Predicate::text), page)
    }

    pub fn get_user(&self, actor: &Actor, id: &str) -> AccessResult<UserAccount> {
        self.guard.fetch(actor, &self.users, id)
    }

    // ── Certificates ─────────────────────────────────────────────────────────

    /// List certificates, optionally only those of one session.
    pub fn list_certificates(
        &self,
        actor: &Actor,
        cot_id: Option<&str>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<Certificate>> {
        let filter = cot_id.map(|id| Predicate::field_equals("cotId", id));
        self.guard.list(actor, &self.certificates, filter, page)
    }

    pub fn print_certificate(&self, actor: &Actor, certificate_id: &str) -> AccessResult<PrintTicket> {
        self.print(actor, &self.certificates, certificate_id)
    }

    // ── Capabilities ─────────────────────────────────────────────────────────

    pub fn list_capabilities(
        &self,
        actor: &Actor,
        search: Option<&str>,
        page: PageRequest,
    ) -> AccessResult<ListResponse<Capability>> {
        self.guard.list(actor, &self.capabilities, search.map(Predicate::text), page)
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn print<T>(&self, actor: &Actor, repo: &InMemoryRepository<T>, id: &str) -> AccessResult<PrintTicket>
    where
        T: Scopable + Clone + Send + Sync,
    {
        let resource = repo.resource();
        let record = self
            .guard
            .load_for(actor, repo, Endpoint::new(resource, Action::Print), id)?;
        Ok(PrintTicket {
            resource,
            record_id: record.id().to_string(),
            requested_by: actor.id().to_string(),
        })
    }
}
