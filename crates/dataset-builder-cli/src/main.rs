use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use dataset_builder_core::{logging, Config, DatasetBuilder, LogLevel};
use log::info;
use std::path::PathBuf;

/// Environment variable holding the search API subscription key
const SUBSCRIPTION_ENV_VAR: &str = "BING_SUBSCRIPTION_KEY";

#[derive(Parser)]
#[command(name = "dataset-builder")]
#[command(about = "Build and deduplicate image datasets")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write rotated logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for images and download the valid ones
    GetImages {
        /// Search query
        #[arg(short, long)]
        query: String,

        /// Directory to download into, classified later by mark-duplicates
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subscription key for the search API
        #[arg(short, long)]
        subscription: Option<String>,
    },

    /// Move novel incoming images into the reference collection and
    /// report the rest as duplicates
    MarkDuplicates {
        /// Known-good image collection
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Directory of candidate images
        #[arg(short, long)]
        incoming: Option<PathBuf>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "dataset-builder.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };

    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir.clone();
    }
    if cli.verbose > 0 {
        config.log_level = match cli.verbose {
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
    }
    init_logging(&config)?;

    match cli.command {
        Commands::GetImages {
            query,
            output,
            subscription,
        } => {
            if let Some(output) = output {
                config.incoming_dir = output;
            }
            config.validate()?;

            let subscription_key = subscription
                .or_else(|| std::env::var(SUBSCRIPTION_ENV_VAR).ok())
                .ok_or_else(|| {
                    anyhow!(
                        "No subscription key: pass --subscription or set {}",
                        SUBSCRIPTION_ENV_VAR
                    )
                })?;

            let builder = DatasetBuilder::new(config);
            let kept = builder
                .get_images(&query, &subscription_key)
                .with_context(|| format!("Image search for '{}' failed", query))?;
            info!("Downloaded {} valid images", kept);
            Ok(())
        }

        Commands::MarkDuplicates {
            reference,
            incoming,
        } => {
            if let Some(reference) = reference {
                config.reference_dir = reference;
            }
            if let Some(incoming) = incoming {
                config.incoming_dir = incoming;
            }
            config.validate()?;

            let builder = DatasetBuilder::new(config);
            let summary = builder.deduplicate()?;
            info!(
                "Deduplication complete: {} moved, {} duplicates, {} skipped",
                summary.relocated(),
                summary.duplicates(),
                summary.skipped()
            );
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

/// log4rs when logging to a file, env_logger for console-only runs
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let level = config.log_level.to_level_filter();
    match &config.log_dir {
        Some(log_dir) => logging::init_logger(Some(log_dir), level)
            .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?,
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env(logging::LOG_ENV_VAR)
                .format_timestamp(None)
                .init();
        }
    }
    Ok(())
}
