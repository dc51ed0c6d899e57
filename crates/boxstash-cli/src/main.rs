//! Boxstash CLI
//!
//! Command-line interface to the box metadata store

use std::path::PathBuf;

use boxstash_core::logging_facility::{init_with_level, Profile};
use boxstash_engine::BoxService;
use clap::{Parser, Subcommand};

mod commands;
mod error;
mod settings;

use error::CliError;
use settings::{Overrides, Settings};

#[derive(Debug, Parser)]
#[command(name = "boxstash")]
#[command(about = "Boxstash - metadata store for versioned boxes", long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path, or :memory:
    #[arg(long, global = true)]
    database_uri: Option<String>,

    /// Log level for boxstash targets (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: text or json
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// User operations
    User(commands::user::UserArgs),
    /// Box operations
    #[command(name = "box")]
    Boxes(commands::vagrant_box::BoxArgs),
    /// Version operations
    Version(commands::version::VersionArgs),
    /// Provider operations
    Provider(commands::provider::ProviderArgs),
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            database_uri: self.database_uri.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())?;
    init_with_level(Profile::from_format(&settings.log_format), &settings.log_level);
    tracing::debug!(database_uri = %settings.database_uri, "settings loaded");

    let store = settings.store_config();
    match cli.command {
        Commands::Migrate => commands::migrate::execute(&store),
        Commands::User(args) => commands::user::execute(&BoxService::open(&store)?, args),
        Commands::Boxes(args) => commands::vagrant_box::execute(&BoxService::open(&store)?, args),
        Commands::Version(args) => commands::version::execute(&BoxService::open(&store)?, args),
        Commands::Provider(args) => {
            commands::provider::execute(&BoxService::open(&store)?, args)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
