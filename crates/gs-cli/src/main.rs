mod mission;
mod monitor;
mod profile;
mod requests;
mod terminal;

use clap::{Parser, Subcommand};
use gs_client::GroundStationClient;
use gs_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::profile::ProfileCommands;
use crate::requests::RequestsCommands;

#[derive(Debug, Parser)]
#[command(name = "gs")]
#[command(about = "Ground station operator console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether a latitude/longitude pair is in range
    Validate {
        /// Latitude in decimal degrees (-90 to 90)
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        /// Longitude in decimal degrees (-180 to 180)
        #[arg(allow_hyphen_values = true)]
        longitude: String,
    },
    /// Imaging (ARO) requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommands,
    },
    /// Operator profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show the recent log feed
    Logs {
        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show the latest telemetry readings
    Telemetry {
        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Send a mission control command and print the reply
    Command {
        /// Typed parameter, e.g. `mode:int:1=3` (repeatable, before the text)
        #[arg(long = "param", value_parser = mission::parse_param)]
        params: Vec<(gs_core::CommandParameter, String)>,
        /// Command text
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        text: Vec<String>,
    },
    /// Open an interactive terminal to the station host
    Terminal {
        /// Override the configured WebSocket URL
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = gs_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, api = %config.api_base_url, "console starting");

    let Some(command) = cli.command else {
        println!("gs: no command given; run `gs --help` for usage");
        return Ok(());
    };

    match command {
        Commands::Validate {
            latitude,
            longitude,
        } => run_validate(&latitude, &longitude),
        Commands::Requests { command } => {
            requests::run(&connect(&config)?, &config, command).await
        }
        Commands::Profile { command } => profile::run(&connect(&config)?, command).await,
        Commands::Logs { watch } => monitor::run_logs(&connect(&config)?, &config, watch).await,
        Commands::Telemetry { watch } => {
            monitor::run_telemetry(&connect(&config)?, &config, watch).await
        }
        Commands::Command { params, text } => {
            mission::run_command(&connect(&config)?, &text, &params).await
        }
        Commands::Terminal { url } => {
            let url = url.unwrap_or_else(|| config.terminal_url.clone());
            terminal::run_terminal(&url).await
        }
    }
}

fn connect(config: &AppConfig) -> anyhow::Result<GroundStationClient> {
    Ok(GroundStationClient::from_config(config)?)
}

fn run_validate(latitude: &str, longitude: &str) -> anyhow::Result<()> {
    match gs_core::parse_coordinate(latitude, longitude) {
        Ok(coordinate) => {
            println!("valid: {coordinate}");
            Ok(())
        }
        Err(e) => anyhow::bail!("invalid coordinate: {e}"),
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("interrupt received; stopping");
}
