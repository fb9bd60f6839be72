//! diklat Training Reference Runtime: Demo CLI
//!
//! Runs the access-policy scenarios, lists records as a given actor, or
//! prints the rights table of the loaded policy.
//!
//! Usage:
//!   cargo run -p demo -- scenarios
//!   cargo run -p demo -- list --role lcu --unit TA --resource participant
//!   cargo run -p demo -- list --role user --participant p-123 --resource cot
//!   cargo run -p demo -- --policy my-policy.toml rights

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use diklat_contracts::{
    actor::{Actor, ActorClaims},
    envelope::{ErrorEnvelope, PageRequest},
    error::{AccessError, AccessResult},
    resource::ResourceType,
    role::RoleName,
};
use diklat_core::AccessGuard;
use diklat_policy::loader;
use diklat_ref_training::{scenarios, TrainingService};

// ── CLI definition ────────────────────────────────────────────────────────────

/// diklat: role-scoped access policy for a training backend.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "diklat training reference runtime demo",
    long_about = "Runs the diklat access scenarios against mock training data,\n\
                  showing role allow-lists, unit partitioning, and rights projection."
)]
struct Cli {
    /// Policy TOML to load instead of the built-in one.
    #[arg(long, global = true, value_name = "FILE")]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every access scenario and report PASS / FAIL.
    Scenarios,
    /// List records of one resource as the given actor.
    List {
        /// Actor role, e.g. "super admin", "supervisor", "lcu", "user".
        #[arg(long)]
        role: String,
        /// Actor organizational unit (dinas).
        #[arg(long)]
        unit: Option<String>,
        /// Participant the actor account is linked to.
        #[arg(long)]
        participant: Option<String>,
        /// participant, user, cot, certificate, capability.
        #[arg(long, default_value = "participant")]
        resource: String,
        /// Free-text search, or the session id for certificates.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 10)]
        size: u64,
    },
    /// Print the rights every role holds on every resource.
    Rights,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-decision output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = load_guard(cli.policy.as_deref()).and_then(|guard| match cli.command {
        Command::Scenarios => run_scenarios(guard),
        Command::List {
            role,
            unit,
            participant,
            resource,
            search,
            page,
            size,
        } => {
            let claims = ActorClaims {
                id: "demo".to_string(),
                role,
                organizational_unit: unit,
                linked_participant_id: participant,
            };
            run_list(guard, claims, &resource, search.as_deref(), page, size)
        }
        Command::Rights => print_rights(&guard),
    });

    if let Err(e) = result {
        let envelope = ErrorEnvelope::from(&e);
        match serde_json::to_string_pretty(&envelope) {
            Ok(body) => eprintln!("{body}"),
            Err(_) => eprintln!("Demo error: {e}"),
        }
        std::process::exit(1);
    }
}

fn load_guard(policy: Option<&std::path::Path>) -> AccessResult<AccessGuard> {
    match policy {
        Some(path) => loader::guard_from_file(path),
        None => loader::builtin_guard(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_scenarios(guard: AccessGuard) -> AccessResult<()> {
    let service = TrainingService::with_mock_data(guard);
    let outcomes = scenarios::run_all(&service)?;
    let failed = outcomes.iter().filter(|o| !o.passed).count();

    println!();
    if failed == 0 {
        println!("All {} scenarios passed.", outcomes.len());
        Ok(())
    } else {
        Err(AccessError::InvalidInput {
            reason: format!("{failed} of {} scenarios failed", outcomes.len()),
        })
    }
}

fn run_list(
    guard: AccessGuard,
    claims: ActorClaims,
    resource: &str,
    search: Option<&str>,
    page: u64,
    size: u64,
) -> AccessResult<()> {
    let actor = Actor::from_claims(claims)?;
    let resource = ResourceType::parse(resource)?;
    let page = PageRequest::new(page, size)?;
    let service = TrainingService::with_mock_data(guard);

    match resource {
        ResourceType::Participant => print_json(&service.list_participants(&actor, search, page)?),
        ResourceType::User => print_json(&service.list_users(&actor, search, page)?),
        ResourceType::TrainingSession => {
            print_json(&service.list_training_sessions(&actor, search, page)?)
        }
        ResourceType::Certificate => print_json(&service.list_certificates(&actor, search, page)?),
        ResourceType::Capability => print_json(&service.list_capabilities(&actor, search, page)?),
        ResourceType::Signature => Err(AccessError::InvalidInput {
            reason: "the reference runtime holds no signature records".to_string(),
        }),
    }
}

fn print_rights(guard: &AccessGuard) -> AccessResult<()> {
    println!("{:<12} {:<12} edit  delete view  print", "role", "resource");
    for role in RoleName::ALL {
        // Rights depend on the role only; unit and link satisfy construction.
        let actor = Actor::new(
            "demo",
            role,
            Some("TA".to_string()),
            Some("p-123".to_string()),
        )?;
        for resource in ResourceType::ALL {
            let rights = guard.rights(&actor, resource);
            println!(
                "{:<12} {:<12} {:<5} {:<6} {:<5} {:<5}",
                role.as_str(),
                resource.as_str(),
                mark(rights.can_edit),
                mark(rights.can_delete),
                mark(rights.can_view),
                mark(rights.can_print),
            );
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(body: &T) -> AccessResult<()> {
    let text = serde_json::to_string_pretty(body).map_err(|e| AccessError::StorageError {
        reason: format!("failed to encode response: {e}"),
    })?;
    println!("{text}");
    Ok(())
}

fn mark(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "-"
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("diklat: Role-scoped Access Policy");
    println!("Training Reference Demo");
    println!("=================================");
    println!();
    println!("Every request passes through:");
    println!("  [1] Endpoint allow-list: role must be named on (resource, action)");
    println!("  [2] Scope resolution: unit partition or own participant only");
    println!("  [3] Query: search and filters run inside the resolved scope");
    println!("  [4] Rights projection: canEdit / canDelete / canView / canPrint");
    println!();
}
