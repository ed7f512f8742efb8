//! `clouds`: command-line front end for Queen of the Clouds progression.
//!
//! This binary is the composition root that assembles:
//! 1. The catalog (built-in, or a directory from `--catalog` / `CLOUDS_CATALOG`)
//! 2. A file-backed repository under the data directory
//! 3. The progression service that applies actions to stored records
//!
//! # Examples
//!
//! ```bash
//! clouds status --user ava
//! clouds award --user ava --content tweet
//! clouds challenge --user ava office_inferno --answers 1,1,0
//! ```

mod commands;
mod dirs;
mod logging;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use clouds_content::{Catalog, ContentFactory};
use clouds_runtime::{FileProgressionRepository, ProgressionService, RuntimeConfig};
use commands::{
    Award, ChallengeCmd, CompleteLevel, Context, Create, Levels, Referral, Status, Tutorial,
};

/// Faith points, filters and levels for Queen of the Clouds
#[derive(Parser)]
#[command(name = "clouds")]
#[command(about = "Progression tools for Queen of the Clouds", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding user records (defaults to CLOUDS_DATA_DIR, then platform-specific location)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog directory with progression.toml and challenges/ (defaults to the built-in catalog)
    #[arg(long, global = true, value_name = "DIR")]
    catalog: Option<PathBuf>,

    /// Print JSON instead of styled text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show faith points, filters and completed levels
    Status(Status),

    /// Create a record for a new user
    Create(Create),

    /// Award points directly or for generated content
    Award(Award),

    /// Redeem the referral bonus
    Referral(Referral),

    /// Complete the tutorial
    Tutorial(Tutorial),

    /// Complete a level
    CompleteLevel(CompleteLevel),

    /// Show or answer a level challenge
    Challenge(ChallengeCmd),

    /// List levels and their lock state
    Levels(Levels),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CLOUDS_* variables)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_dir = std::env::var_os("CLOUDS_LOG_DIR").map(PathBuf::from);
    let _guard = logging::setup_logging(log_dir.as_deref())?;

    let runtime_config = RuntimeConfig::from_env();
    let ctx = build_context(&cli, &runtime_config)?;

    match cli.command {
        Command::Status(cmd) => cmd.execute(&ctx),
        Command::Create(cmd) => cmd.execute(&ctx),
        Command::Award(cmd) => cmd.execute(&ctx),
        Command::Referral(cmd) => cmd.execute(&ctx),
        Command::Tutorial(cmd) => cmd.execute(&ctx),
        Command::CompleteLevel(cmd) => cmd.execute(&ctx),
        Command::Challenge(cmd) => cmd.execute(&ctx),
        Command::Levels(cmd) => cmd.execute(&ctx),
    }
}

fn build_context(cli: &Cli, runtime_config: &RuntimeConfig) -> Result<Context> {
    let catalog = match cli
        .catalog
        .clone()
        .or_else(|| runtime_config.catalog_path.clone())
    {
        Some(dir) => {
            tracing::debug!("Loading catalog from {}", dir.display());
            ContentFactory::new(dir).load_catalog()?
        }
        None => Catalog::builtin()?,
    };

    let data_dir =
        dirs::resolve_data_dir(cli.data_dir.clone(), runtime_config.data_dir.clone());
    let repository = FileProgressionRepository::new(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    tracing::debug!("Records stored in {}", data_dir.display());

    let service = ProgressionService::with_runtime_config(
        Arc::new(repository),
        catalog.config().clone(),
        runtime_config,
    );

    Ok(Context {
        service,
        catalog,
        json: cli.json,
    })
}
