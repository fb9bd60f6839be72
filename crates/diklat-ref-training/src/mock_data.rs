//! Simulated training data for the reference runtime.
//!
//! All data in this module is hardcoded and fictional. Three units ("dinas")
//! are represented: TA, TB and TC. Participant `p-123` is the user account
//! `u-andi`, used throughout the scenarios as the self-scoped actor.

use chrono::NaiveDate;

use diklat_contracts::role::RoleName;

use crate::records::{Capability, Certificate, Participant, TrainingSession, UserAccount};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn participant(id: &str, name: &str, nik: &str, dinas: &str, company: &str) -> Participant {
    Participant {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
        nik: nik.to_string(),
        dinas: dinas.to_string(),
        company: company.to_string(),
    }
}

// ── Participants ─────────────────────────────────────────────────────────────

pub fn participants() -> Vec<Participant> {
    vec![
        participant("p-123", "Andi Saputra", "3171010101900001", "TA", "GMF AeroAsia"),
        participant("p-124", "Budi Hartono", "3171010101900002", "TA", "GMF AeroAsia"),
        participant("p-125", "Citra Lestari", "3171010101900003", "TA", "Citilink"),
        participant("p-201", "Dedi Kurniawan", "3273010101900004", "TB", "Garuda Indonesia"),
        participant("p-202", "Eka Pratiwi", "3273010101900005", "TB", "Garuda Indonesia"),
        participant("p-301", "Fajar Nugroho", "3578010101900006", "TC", "Lion Air"),
    ]
}

// ── Training sessions (COT) ──────────────────────────────────────────────────

pub fn training_sessions() -> Vec<TrainingSession> {
    let session = |id: &str, cap: &str, location: &str, start: NaiveDate, dinas: &str, enrolled: &[&str]| {
        TrainingSession {
            id: id.to_string(),
            capability_id: cap.to_string(),
            training_location: location.to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(4),
            instructor: "Instruktur Utama".to_string(),
            dinas: dinas.to_string(),
            participant_ids: enrolled.iter().map(|s| s.to_string()).collect(),
        }
    };

    vec![
        session("cot-1", "cap-atr", "Jakarta", date(2024, 3, 4), "TA", &["p-123", "p-124"]),
        session("cot-2", "cap-b737", "Bandung", date(2024, 4, 8), "TB", &["p-201"]),
        session("cot-3", "cap-b737", "Jakarta Timur", date(2024, 5, 6), "TB", &["p-202"]),
        session("cot-4", "cap-a320", "Surabaya", date(2024, 6, 3), "TC", &["p-301"]),
        session("cot-5", "cap-atr", "Batam", date(2024, 7, 1), "TA", &["p-125"]),
    ]
}

// ── User accounts ────────────────────────────────────────────────────────────

pub fn user_accounts() -> Vec<UserAccount> {
    let account = |id: &str, name: &str, role: RoleName, dinas: Option<&str>, participant: Option<&str>| {
        UserAccount {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.test"),
            role,
            dinas: dinas.map(str::to_string),
            participant_id: participant.map(str::to_string),
        }
    };

    vec![
        account("u-sa", "Admin Pusat", RoleName::SuperAdmin, None, None),
        account("u-sup", "Pengawas", RoleName::Supervisor, None, None),
        account("u-lcu-ta", "Operator TA", RoleName::Lcu, Some("TA"), None),
        account("u-lcu-tb", "Operator TB", RoleName::Lcu, Some("TB"), None),
        account("u-andi", "Andi Saputra", RoleName::User, Some("TA"), Some("p-123")),
        account("u-dedi", "Dedi Kurniawan", RoleName::User, Some("TB"), Some("p-201")),
    ]
}

// ── Certificates ─────────────────────────────────────────────────────────────

pub fn certificates() -> Vec<Certificate> {
    let cert = |id: &str, number: &str, participant: &str, cot: &str, dinas: &str| Certificate {
        id: id.to_string(),
        number: number.to_string(),
        participant_id: participant.to_string(),
        cot_id: cot.to_string(),
        dinas: dinas.to_string(),
        expires_on: date(2026, 3, 8),
    };

    vec![
        cert("cert-1", "TA/ATR/2024/001", "p-123", "cot-1", "TA"),
        cert("cert-2", "TA/ATR/2024/002", "p-124", "cot-1", "TA"),
        cert("cert-3", "TB/B737/2024/001", "p-201", "cot-2", "TB"),
    ]
}

// ── Capabilities ─────────────────────────────────────────────────────────────

pub fn capabilities() -> Vec<Capability> {
    let cap = |id: &str, code: &str, name: &str, curriculum: &[&str]| Capability {
        id: id.to_string(),
        rating_code: code.to_string(),
        training_name: name.to_string(),
        curriculum: curriculum.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        cap("cap-atr", "ATR72", "ATR 72-600 Type Rating", &["Airframe", "Powerplant", "Avionics"]),
        cap("cap-b737", "B737", "Boeing 737 NG Type Rating", &["Airframe", "Powerplant"]),
        cap("cap-a320", "A320", "Airbus A320 Type Rating", &["Airframe", "Avionics"]),
    ]
}
