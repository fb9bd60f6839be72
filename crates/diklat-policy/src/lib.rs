//! # diklat-policy
//!
//! A TOML-driven, deny-by-default access policy for the diklat training
//! backend.
//!
//! ## Overview
//!
//! This crate provides the three decision components consumed by
//! [`AccessGuard`](diklat_core::AccessGuard):
//!
//! - [`TomlActionAuthorizer`]: explicit per-endpoint role allow-lists
//! - [`PartitionScopeResolver`]: unit / participant row partitioning
//! - [`RightsTable`]: per-resource role→flags table
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use diklat_policy::loader;
//!
//! let guard = loader::guard_from_file(Path::new("policies/training.toml"))?;
//! // or, with the policy compiled into the binary:
//! let guard = loader::builtin_guard()?;
//! ```
//!
//! ## Rule matching
//!
//! Each rule names exactly one `resource` and `action`. There are no
//! wildcards and no role hierarchy: a role is allowed only where it is listed.

pub mod engine;
pub mod loader;
pub mod rights;
pub mod rule;
pub mod scope;

pub use engine::TomlActionAuthorizer;
pub use rights::RightsTable;
pub use rule::{EndpointRule, PolicyConfig, RightsEntry};
pub use scope::PartitionScopeResolver;

// ── Tests ─────────────────────────────────────────────────────────────────────
