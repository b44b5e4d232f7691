//! Bugle
//!
//! Polls a JIRA board for issues, renders a bug statistics report, and
//! delivers it to a DingTalk group robot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bugle_cli::commands;
use bugle_core::models::LogConfig;
use bugle_core::storage::{default_config_path, ConfigStorage};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bugle")]
#[command(about = "JIRA board bug reports delivered to DingTalk", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch board issues, build the report, save it, and notify the group
    Run {
        /// Board id override (otherwise taken from the config file)
        #[arg(long)]
        board: Option<u64>,
    },

    /// List the boards visible to the configured account
    Boards,

    /// Send an ad-hoc markdown message through the group robot
    Send {
        /// Message text
        #[arg(long, default_value = "钉钉，让进步发生")]
        message: String,

        /// User ids to mention, comma separated
        #[arg(long)]
        at_user_ids: Option<String>,

        /// Mobile numbers to mention, comma separated
        #[arg(long)]
        at_mobiles: Option<String>,

        /// Mention everyone in the group
        #[arg(long)]
        at_all: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let storage = ConfigStorage::new(config_path);
    let config = storage.load()?;
    config.validate()?;

    init_logging(&config.log)?;
    tracing::debug!(config = %storage.path().display(), "configuration loaded");

    match cli.command {
        Commands::Run { board } => commands::run(&config, board).await,
        Commands::Boards => commands::boards(&config).await,
        Commands::Send {
            message,
            at_user_ids,
            at_mobiles,
            at_all,
        } => {
            commands::send(
                &config,
                &message,
                at_user_ids.as_deref(),
                at_mobiles.as_deref(),
                at_all,
            )
            .await
        }
    }
}

fn init_logging(log: &LogConfig) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new(&log.level);

    match &log.file {
        Some(file) => {
            let path = Path::new(file);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }

            let log_file = fs::OpenOptions::new().create(true).append(true).open(path)?;

            // Console stays at info; the file keeps debug detail.
            let stdout_writer = std::io::stdout.with_max_level(tracing::Level::INFO);
            let file_writer = log_file.with_max_level(tracing::Level::DEBUG);

            tracing_subscriber::fmt()
                .with_writer(stdout_writer.and(file_writer))
                .with_env_filter(filter)
                .with_ansi(false) // No color codes in log file
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    Ok(())
}
