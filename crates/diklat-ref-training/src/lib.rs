//! # diklat-ref-training
//!
//! Reference runtime for the diklat access policy: a training-management
//! backend in miniature.
//!
//! Participants enroll in training sessions ("COT"), receive certificates,
//! and manage their accounts. Every request goes through the
//! [`AccessGuard`](diklat_core::AccessGuard) built from the built-in policy.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;
pub mod records;
pub mod scenarios;
pub mod service;
pub mod store;

pub use service::TrainingService;

// ── Tests ─────────────────────────────────────────────────────────────────────
