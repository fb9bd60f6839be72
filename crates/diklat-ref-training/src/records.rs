//! Row types served by the reference runtime.
//!
//! Field names serialize in camelCase to match the list payloads clients
//! already consume; the unit column keeps its original name, `dinas`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use diklat_contracts::{role::RoleName, scope::Scopable};

/// A person enrolled, or eligible to enroll, in training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Employee or national id number.
    pub nik: String,
    pub dinas: String,
    pub company: String,
}

impl Scopable for Participant {
    fn id(&self) -> &str {
        &self.id
    }

    fn organizational_unit(&self) -> Option<&str> {
        Some(&self.dinas)
    }

    fn is_linked_to(&self, participant_id: &str) -> bool {
        self.id == participant_id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "dinas" => Some(&self.dinas),
            "email" => Some(&self.email),
            "nik" => Some(&self.nik),
            "company" => Some(&self.company),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.nik, &self.company]
    }
}

/// A training session ("COT": certification of training).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: String,
    pub capability_id: String,
    pub training_location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor: String,
    pub dinas: String,
    /// Ids of enrolled participants.
    pub participant_ids: Vec<String>,
}

impl Scopable for TrainingSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn organizational_unit(&self) -> Option<&str> {
        Some(&self.dinas)
    }

    fn is_linked_to(&self, participant_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == participant_id)
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "dinas" => Some(&self.dinas),
            "capabilityId" => Some(&self.capability_id),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.training_location, &self.instructor, &self.capability_id]
    }
}

/// A login account. `user` accounts link to the participant they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub dinas: Option<String>,
    pub participant_id: Option<String>,
}

impl Scopable for UserAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn organizational_unit(&self) -> Option<&str> {
        self.dinas.as_deref()
    }

    fn is_linked_to(&self, participant_id: &str) -> bool {
        self.participant_id.as_deref() == Some(participant_id)
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "email" => Some(&self.email),
            "role" => Some(self.role.as_str()),
            "dinas" => self.dinas.as_deref(),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

/// A certificate issued to a participant for a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub number: String,
    pub participant_id: String,
    pub cot_id: String,
    pub dinas: String,
    pub expires_on: NaiveDate,
}

impl Scopable for Certificate {
    fn id(&self) -> &str {
        &self.id
    }

    fn organizational_unit(&self) -> Option<&str> {
        Some(&self.dinas)
    }

    fn is_linked_to(&self, participant_id: &str) -> bool {
        self.participant_id == participant_id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "cotId" => Some(&self.cot_id),
            "participantId" => Some(&self.participant_id),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.number]
    }
}

/// A rating a participant can be trained for, with its curriculum.
///
/// Reference data: not partitioned by unit or participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: String,
    pub rating_code: String,
    pub training_name: String,
    pub curriculum: Vec<String>,
}

impl Scopable for Capability {
    fn id(&self) -> &str {
        &self.id
    }

    fn organizational_unit(&self) -> Option<&str> {
        None
    }

    fn is_linked_to(&self, _participant_id: &str) -> bool {
        false
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "ratingCode" => Some(&self.rating_code),
            _ => None,
        }
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.rating_code, &self.training_name]
    }
}
