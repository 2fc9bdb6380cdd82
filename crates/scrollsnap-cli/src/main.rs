use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scrollsnap_core::{AppConfig, Heading};

mod commands;

#[derive(Parser)]
#[command(name = "scrollsnap")]
#[command(author, version, about = "Scroll snapping for containers without native support")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/scrollsnap/config.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal playground
    Run,
    /// Print the snap point for a single axis
    Decide {
        /// Current scroll offset in pixels
        #[arg(long)]
        offset: f64,
        /// Distance between snap points in pixels
        #[arg(long)]
        length: f64,
        /// Offset of the last confirmed snap point
        #[arg(long, default_value_t = 0.0)]
        last_valid: f64,
        /// Largest reachable offset
        #[arg(long)]
        extent: f64,
        /// Direction the gesture was travelling
        #[arg(long, value_enum, default_value_t = HeadingArg::Still)]
        heading: HeadingArg,
        /// Fraction of a cell that must be crossed to advance
        #[arg(long)]
        threshold: Option<f64>,
        /// Never skip an intermediate cell
        #[arg(long)]
        snap_stop: bool,
        /// Treat the request as an arrow or keyboard step
        #[arg(long)]
        programmatic: bool,
        /// Print a JSON report instead of the bare offset
        #[arg(long)]
        json: bool,
    },
    /// Validate and print the effective configuration
    Config {
        /// Write the effective configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeadingArg {
    Backward,
    Still,
    Forward,
}

impl From<HeadingArg> for Heading {
    fn from(arg: HeadingArg) -> Self {
        match arg {
            HeadingArg::Backward => Heading::Backward,
            HeadingArg::Still => Heading::Still,
            HeadingArg::Forward => Heading::Forward,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Decide {
            offset,
            length,
            last_valid,
            extent,
            heading,
            threshold,
            snap_stop,
            programmatic,
            json,
        }) => commands::decide::run(
            &config,
            commands::decide::DecideArgs {
                offset,
                length,
                last_valid,
                extent,
                heading: heading.into(),
                threshold,
                snap_stop,
                programmatic,
                json,
            },
        ),
        Some(Commands::Config { init }) => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            commands::config::run(&config, &path, init)
        }
    }
}

/// The playground owns the terminal, so its logs go to a file
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let file_layer = if interactive {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    let stderr_layer = (!interactive).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}
