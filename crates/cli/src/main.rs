mod commands;
mod error;
mod loader;
mod reporter;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use error::CliError;

#[derive(Parser)]
#[command(name = "pgshift")]
#[command(about = "PostgreSQL schema migration tool", version)]
struct Cli {
    /// Connection string for the target database
    #[arg(long, env = "PGSHIFT_CONNECTION_STRING", hide_env_values = true)]
    connection_string: String,

    /// Directory holding migration definition files
    #[arg(long)]
    path: PathBuf,

    /// Execute migrations but always roll the transactions back
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Enable debug output
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations in version order
    Migrate {
        /// Highest version to apply; later migrations stay pending
        #[arg(long)]
        version: Option<i32>,
    },

    /// Show the database's current version and pending migrations
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Migrate { version } => {
            commands::migrate::run(&cli.connection_string, &cli.path, cli.dry_run, version).await?;
        }
        Commands::Info { json } => {
            commands::info::run(&cli.connection_string, &cli.path, json).await?;
        }
    }

    Ok(())
}
