//! School management command line client
//!
//! # Usage
//!
//! ```bash
//! # List students
//! SCHOOL_API_URL=http://localhost:3000 school_cli list students
//!
//! # Show one teacher as JSON
//! school_cli -o json show teacher 4
//!
//! # Create a discipline
//! school_cli create discipline --json '{"name":"Physics","workload_hours":60}'
//!
//! # Delete a student (asks for confirmation first)
//! school_cli delete student 12 --name "Ana Souza"
//! ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use school_client::models::{Discipline, Resource, SchoolClass, Student, Teacher};
use school_client::services::ResourceService;
use school_client::{
    ActionRequest, ApiClient, ClientConfig, ConsolePresenter, DestructiveActionWorkflow,
    ResourceId, ResourceKind, Target, WorkflowState,
};

#[derive(Parser)]
#[command(name = "school_cli")]
#[command(version)]
#[command(about = "Command line client for the school management API")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(long, global = true, env = "SCHOOL_API_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "SCHOOL_API_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: Option<u64>,

    /// Output format for read commands
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record of a kind: student, teacher, discipline, class
    List { kind: ResourceKind },

    /// Show one record
    Show { kind: ResourceKind, id: String },

    /// Create a record from a JSON payload
    Create {
        kind: ResourceKind,
        #[arg(long)]
        json: String,
    },

    /// Replace a record with a JSON payload
    Update {
        kind: ResourceKind,
        id: String,
        #[arg(long)]
        json: String,
    },

    /// Delete a record after confirmation
    Delete {
        kind: ResourceKind,
        id: String,
        /// Name shown in the confirmation prompt
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Run a generic command with the record type matching `kind`
macro_rules! dispatch {
    ($kind:expr, $r:ident => $call:expr) => {
        match $kind {
            ResourceKind::Student => {
                type $r = Student;
                $call
            }
            ResourceKind::Teacher => {
                type $r = Teacher;
                $call
            }
            ResourceKind::Discipline => {
                type $r = Discipline;
                $call
            }
            ResourceKind::SchoolClass => {
                type $r = SchoolClass;
                $call
            }
        }
    };
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = ApiClient::new(&config)?;
    let format = cli.format;

    let result = match cli.command {
        Commands::List { kind } => dispatch!(kind, R => cmd_list::<R>(client, format).await),
        Commands::Show { kind, id } => {
            let id = ResourceId::from(id);
            dispatch!(kind, R => cmd_show::<R>(client, &id, format).await)
        }
        Commands::Create { kind, json } => {
            dispatch!(kind, R => cmd_create::<R>(client, &json, format).await)
        }
        Commands::Update { kind, id, json } => {
            let id = ResourceId::from(id);
            dispatch!(kind, R => cmd_update::<R>(client, &id, &json, format).await)
        }
        Commands::Delete { kind, id, name } => return cmd_delete(client, kind, id, name).await,
    };
    result?;

    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_list<R: Resource>(client: ApiClient, format: OutputFormat) -> Result<()> {
    let records = ResourceService::<R>::new(client).list().await?;
    match format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Pretty => {
            println!("{} {} {}(s)", "OK".green(), records.len(), R::KIND);
            for record in &records {
                println!("  {}", serde_json::to_string(record)?);
            }
        }
    }
    Ok(())
}

async fn cmd_show<R: Resource>(
    client: ApiClient,
    id: &ResourceId,
    format: OutputFormat,
) -> Result<()> {
    let record = ResourceService::<R>::new(client).get(id).await?;
    print_record(&record, format)
}

async fn cmd_create<R: Resource>(
    client: ApiClient,
    json: &str,
    format: OutputFormat,
) -> Result<()> {
    let record: R = serde_json::from_str(json)
        .with_context(|| format!("Invalid {} payload", R::KIND))?;
    let created = ResourceService::<R>::new(client).create(&record).await?;
    print_record(&created, format)
}

async fn cmd_update<R: Resource>(
    client: ApiClient,
    id: &ResourceId,
    json: &str,
    format: OutputFormat,
) -> Result<()> {
    let record: R = serde_json::from_str(json)
        .with_context(|| format!("Invalid {} payload", R::KIND))?;
    let updated = ResourceService::<R>::new(client).update(id, &record).await?;
    print_record(&updated, format)
}

async fn cmd_delete(
    client: ApiClient,
    kind: ResourceKind,
    id: String,
    name: Option<String>,
) -> Result<ExitCode> {
    let mut target = Target::new(kind, id);
    if let Some(name) = name {
        target = target.named(name);
    }

    let presenter = ConsolePresenter::new();
    let workflow =
        DestructiveActionWorkflow::new(ActionRequest::delete(target), &client, &presenter);
    let report = workflow.run(|| {}).await;

    Ok(match report.state {
        WorkflowState::Failed => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn print_record<T: Serialize>(record: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Pretty => {
            println!("{} {}", "OK".green(), serde_json::to_string(record)?);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}
