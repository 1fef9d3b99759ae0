//! User Registry CLI - validation, seeding and scripted sessions.
//!
//! # Usage
//!
//! ```bash
//! # Check form values without storing anything
//! ur-cli validate --name "Ada" --email ada@example.com --phone "+44 20 7946 0958"
//!
//! # Load users from a YAML file and print the list
//! ur-cli seed users.yaml
//!
//! # Replay a YAML script of form/list actions
//! ur-cli run session.yaml --strict
//! ```
//!
//! # Commands
//!
//! - `validate` - Run the field validators
//! - `seed` - Add users from a YAML file through the form
//! - `run` - Replay fill/submit/edit/cancel/delete steps against a fresh store
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Log filter (default: `user_registry=info,ur_cli=info`)
//! - `USER_REGISTRY_MISSING_ID_POLICY` - `ignore` or `reject`
//! - `USER_REGISTRY_FIRST_ID` - First user ID handed out

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "ur-cli")]
#[command(author, version, about = "User registry CLI tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate form field values
    Validate {
        /// User name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,

        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
    },
    /// Add users from a YAML file
    Seed {
        /// Path to a YAML list of `{name, email, phone}` records
        file: PathBuf,
    },
    /// Replay a YAML script of form and list actions
    Run {
        /// Path to the script
        script: PathBuf,

        /// Fail update/delete of unknown user IDs
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries command output.
fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "user_registry=info,ur_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Validate { name, email, phone } => {
            commands::validate::fields(&name, &email, &phone, &mut stdout)?;
        }
        Commands::Seed { file } => {
            commands::seed::users(&file, &mut stdout)?;
        }
        Commands::Run { script, strict } => {
            commands::script::run_file(&script, strict, &mut stdout)?;
        }
    }
    Ok(())
}
