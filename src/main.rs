//! fleetguard - authorization decisions from the command line
//!
//! Evaluates a single permission check against the configured catalog and
//! ad-hoc company grants, or prints the effective role catalog.

#![allow(missing_docs)]

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use fleetguard::utils::{bootstrap_dispatch, init_logging};
use fleetguard::{AuthorizationSystem, Config, DecisionContext, Principal, Role};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing::instrument::WithSubscriber;

#[derive(Debug, Parser)]
#[command(name = "fleetguard", version, about = "Fleet operations authorization engine")]
struct Cli {
    /// YAML configuration file; environment variables are used when absent
    #[arg(long, global = true, env = "FLEETGUARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one permission check and print the decision as JSON
    Check(CheckArgs),
    /// Print the effective role catalog as YAML
    Catalog {
        /// Only print this role
        #[arg(long)]
        role: Option<Role>,
    },
    /// Load and validate a configuration file
    ValidateConfig { path: PathBuf },
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Acting user id; omit to check as an unauthenticated caller
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    role: Option<Role>,
    #[arg(long)]
    home_company: Option<String>,
    #[arg(long)]
    resource: String,
    #[arg(long)]
    action: String,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    resource_company: Option<String>,
    #[arg(long)]
    owner: Option<String>,
    #[arg(long)]
    amount: Option<f64>,
    /// Company grant for the acting user, as COMPANY=MATRIX_JSON (repeatable)
    #[arg(long = "grant", value_name = "COMPANY=MATRIX_JSON")]
    grants: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Loading logs through a scoped subscriber until the configured one exists
    let bootstrap = bootstrap_dispatch("info");

    if let Command::ValidateConfig { path } = &cli.command {
        Config::from_file(path)
            .with_subscriber(bootstrap)
            .await
            .with_context(|| format!("{} is not a valid configuration", path.display()))?;
        println!("{}: ok", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_subscriber(bootstrap)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => tracing::dispatcher::with_default(&bootstrap, Config::from_env)?,
    };
    init_logging(&config.logging);
    debug!(?config, "Configuration resolved");

    let system = AuthorizationSystem::new(&config);

    match cli.command {
        Command::Check(args) => check(&system, args),
        Command::Catalog { role } => print_catalog(&system, role),
        Command::ValidateConfig { .. } => Ok(()),
    }
}

fn check(system: &AuthorizationSystem, args: CheckArgs) -> anyhow::Result<()> {
    let principal = match (&args.user, args.role) {
        (Some(user), Some(role)) => {
            let mut principal = Principal::new(user.clone(), role);
            principal.home_company_id = args.home_company.clone();
            Some(principal)
        }
        (Some(_), None) => return Err(anyhow!("--role is required when --user is given")),
        (None, _) => None,
    };

    for spec in &args.grants {
        let user = args
            .user
            .as_deref()
            .ok_or_else(|| anyhow!("--grant requires --user"))?;
        let (company, matrix) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("grant must look like COMPANY=MATRIX_JSON, got {}", spec))?;
        let matrix: serde_json::Value = serde_json::from_str(matrix)
            .with_context(|| format!("grant for {} is not valid JSON", company))?;
        system.admin().upsert_grant_json(user, company, matrix)?;
    }

    let context = DecisionContext {
        company_id: args.company,
        resource_company_id: args.resource_company,
        resource_owner_id: args.owner,
        amount: args.amount,
    };

    let decision =
        system
            .access()
            .has_permission_str(principal.as_ref(), &args.resource, &args.action, &context);
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn print_catalog(system: &AuthorizationSystem, role: Option<Role>) -> anyhow::Result<()> {
    let catalog = system.access().catalog();
    let roles: Vec<Role> = match role {
        Some(role) => vec![role],
        None => catalog.roles().collect(),
    };

    let view: BTreeMap<Role, _> = roles
        .into_iter()
        .map(|role| (role, catalog.rules(role)))
        .collect();
    print!("{}", serde_yaml::to_string(&view)?);
    Ok(())
}
