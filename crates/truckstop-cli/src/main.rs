use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use truckstop_etl::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "truckstop", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/truckstop/truckstop.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Serve the search API
    ///
    /// On first run the permit dataset is downloaded and stored before the
    /// server starts listening. Later runs reuse the stored snapshot.
    ///
    /// Endpoints:
    ///
    /// - GET  /search/name/{term}?status=...
    /// - GET  /search/address/{term}
    /// - POST /search/nearest  {"latitude", "longitude", "include_all_statuses"}
    /// - GET  /health
    ///
    /// Nearest search uses walking distances from the Google Distance Matrix
    /// API when google_maps_api_key is configured, and straight-line
    /// distances otherwise.
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Download the permit dataset into the database
    Ingest {
        /// Replace an existing snapshot
        #[arg(long)]
        force: bool,
        /// Read rows from a local JSON snapshot instead of the dataset URL
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// Show what the database holds
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file
    Get {
        /// Config key
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file if it does not exist
    Init,
}

fn load_config(db: Option<PathBuf>) -> Result<Config> {
    match db {
        Some(path) => Config::load_with_db_path(path),
        None => Config::load(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = load_config(cli.db)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            commands::run_serve(&config).await?;
        }
        Commands::Ingest { force, from_file } => {
            let config = load_config(cli.db)?;
            commands::run_ingest(&config, force, from_file).await?;
        }
        Commands::Status => {
            let config = load_config(cli.db)?;
            commands::show_status(&config)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(cli.db)?;
                commands::config::show_config(&config)?;
            }
            ConfigAction::Get { key } => {
                let config = load_config(cli.db)?;
                commands::config::get_config(&config, key)?;
            }
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
