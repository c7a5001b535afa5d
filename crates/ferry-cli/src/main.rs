use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

mod runner;

use ferry_config::ReplicationConfig;
use ferry_core::ReplicationPlan;
use ferry_loader::SlingLoader;
use ferry_staging::GcsStagingStore;
use ferry_warehouse::BqCliWarehouse;
use runner::SourceSelection;

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "Replicate warehouse tables through staged exports and bulk loads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to ferry.toml config file
    #[arg(short, long, default_value = "ferry.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ferry project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show which tables each source would replicate, without side effects
    Plan {
        /// Which configured sources to process
        #[arg(long, value_enum, default_value = "both")]
        sources: SourceSelection,
    },

    /// Run the export-then-load replication pipeline
    Run {
        /// Which configured sources to process
        #[arg(long, value_enum, default_value = "both")]
        sources: SourceSelection,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ferry=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => cmd_init(&path),
        Commands::Plan { sources } => {
            let plan = load_plan(&cli.config)?;
            cmd_plan(plan, sources).await
        }
        Commands::Run { sources } => {
            let plan = load_plan(&cli.config)?;
            cmd_run(plan, sources).await
        }
    }
}

fn load_plan(path: &Path) -> Result<ReplicationPlan> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = ReplicationConfig::parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let plan = ferry_config::to_plan(&config).context("Invalid replication config")?;
    Ok(plan)
}

fn cmd_init(path: &Path) -> Result<()> {
    info!(path = %path.display(), "Initializing ferry project");

    fs::create_dir_all(path.join("ferry/loads"))?;

    let env_example = r#"# Ferry environment variables
# Copy this to .env and fill in your values

# Service-account credentials for warehouse exports and staging access
GOOGLE_APPLICATION_CREDENTIALS=/path/to/service-account.json

# Staging bucket referenced from ferry.toml
FERRY_STAGING_BUCKET=your-staging-bucket
"#;

    let env_example_path = path.join(".env.example");
    if !env_example_path.exists() {
        fs::write(&env_example_path, env_example)?;
        info!(path = %env_example_path.display(), "Created .env.example");
    }

    let config = r#"# Ferry configuration
# Secrets are loaded from .env; ${VAR} values resolve from the environment.

project = "your-project-id"
dataset = "analytics"
timezone = "UTC"

# "plain" runs each source independently; "daily+streaming" purges the
# intraday staging directory once the matching daily table has loaded.
export_strategy = "plain"

[sources.daily]
table_prefix = "events_"
bucket = "${FERRY_STAGING_BUCKET}"
bucket_suffix = "exports/daily"
file_format = "json"
# One of: today, range, all-time
replication_scheme = "today"
# date_range_start = "20230101"
# date_range_end = "20230105"
load_template = "ferry/loads/daily.toml"

[sources.intraday]
table_prefix = "events_intraday_"
bucket = "${FERRY_STAGING_BUCKET}"
bucket_suffix = "exports/intraday"
file_format = "json"
replication_scheme = "today"
load_template = "ferry/loads/intraday.toml"
"#;

    let config_path = path.join("ferry.toml");
    if !config_path.exists() {
        fs::write(&config_path, config)?;
        info!(path = %config_path.display(), "Created ferry.toml");
    } else {
        warn!(path = %config_path.display(), "Config file already exists, skipping");
    }

    let daily_template = r#"# Load job for daily exports
source_conn = "GCS"
source_stream = "{object}"
target_conn = "WAREHOUSE"
target_object = "analytics.events"
mode = "append"
"#;

    let intraday_template = r#"# Load job for intraday exports
# The first intraday load of a run is forced to full-refresh automatically.
source_conn = "GCS"
source_stream = "{object}"
target_conn = "WAREHOUSE"
target_object = "analytics.events_intraday"
mode = "append"
"#;

    for (name, contents) in [
        ("daily.toml", daily_template),
        ("intraday.toml", intraday_template),
    ] {
        let template_path = path.join("ferry/loads").join(name);
        if !template_path.exists() {
            fs::write(&template_path, contents)?;
            info!(path = %template_path.display(), "Created load template");
        }
    }

    println!("\nFerry project initialized!\n");
    println!("Next steps:");
    println!("  1. Copy .env.example to .env and fill in your credentials");
    println!("  2. Edit ferry.toml for your project, dataset, and buckets");
    println!("  3. Edit the load templates under ferry/loads/");
    println!("  4. Run: ferry plan");
    println!("  5. Run: ferry run\n");

    Ok(())
}

async fn cmd_plan(plan: ReplicationPlan, sources: SourceSelection) -> Result<()> {
    let warehouse = BqCliWarehouse::new();

    for source in plan.sources.iter().filter(|s| sources.includes(s.kind)) {
        let tables = runner::select_for_source(&plan, source, &warehouse).await?;

        println!("\n{} ({} scheme): {} table(s)", source.kind, source.scheme, tables.len());
        for table in &tables {
            println!("  {}", table);
        }
    }

    println!();
    Ok(())
}

async fn cmd_run(plan: ReplicationPlan, sources: SourceSelection) -> Result<()> {
    info!(strategy = %plan.strategy, "Starting replication run");

    let warehouse = BqCliWarehouse::new();
    let staging = GcsStagingStore::new();
    let loader = SlingLoader::new();

    runner::run_replication(&plan, sources, &warehouse, &staging, &loader).await
}
