//! VELLUM CLI - Command Line Interface

mod commands;

use clap::{Parser, Subcommand};
use commands::{load_config, print_response, Runtime};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vellum_record_contract::{
    CREATE_OPERATION, DELETE_OPERATION, EXISTS_OPERATION, READ_OPERATION, UPDATE_OPERATION,
};

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "VELLUM - Smart-Contract Runtime CLI")]
#[command(version)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Use a throwaway in-memory store
    #[arg(short, long)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a record exists
    Exists {
        /// Record id
        id: String,
    },

    /// Create a record
    Create {
        /// Record id
        id: String,

        /// Record value
        value: String,
    },

    /// Read a record
    Read {
        /// Record id
        id: String,
    },

    /// Replace a record's value
    Update {
        /// Record id
        id: String,

        /// Replacement value
        new_value: String,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: String,
    },

    /// Dispatch an operation by its registered name
    Invoke {
        /// Operation name
        operation: String,

        /// Operation arguments
        args: Vec<String>,
    },

    /// Print the registered operations as JSON
    Ops,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.data_dir, cli.memory)?;
    init_logging(&config.log_level);

    let runtime = Runtime::open(&config)?;

    let (operation, args) = match cli.command {
        Commands::Exists { id } => (EXISTS_OPERATION.to_string(), vec![id]),
        Commands::Create { id, value } => (CREATE_OPERATION.to_string(), vec![id, value]),
        Commands::Read { id } => (READ_OPERATION.to_string(), vec![id]),
        Commands::Update { id, new_value } => (UPDATE_OPERATION.to_string(), vec![id, new_value]),
        Commands::Delete { id } => (DELETE_OPERATION.to_string(), vec![id]),
        Commands::Invoke { operation, args } => (operation, args),
        Commands::Ops => {
            println!("{}", serde_json::to_string_pretty(&runtime.metadata())?);
            return Ok(());
        }
    };

    match runtime.invoke(&operation, &args).await {
        Ok(response) => {
            print_response(response);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging on stderr, keeping stdout clean for JSON output
fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(Level::INFO);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
