use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SF OpenData mobile food facility permits, JSON rows.
pub const DEFAULT_DATASET_URL: &str = "https://data.sfgov.org/resource/rqzj-sfat.json";

/// Configuration for truckstop.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TRUCKSTOP_* prefix)
/// 3. Config file (~/.config/truckstop/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Maps API key. Enables walking distances from the Distance
    /// Matrix API; without it every distance is geodesic.
    ///
    /// Can be set via:
    /// - ENV: TRUCKSTOP_GOOGLE_MAPS_API_KEY
    /// - Config: google_maps_api_key = "..."
    #[serde(default)]
    pub google_maps_api_key: Option<String>,

    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: TRUCKSTOP_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/truckstop/truckstop.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Permit dataset endpoint.
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,

    /// Maximum rows requested from the dataset endpoint.
    #[serde(default = "default_dataset_row_limit")]
    pub dataset_row_limit: usize,

    /// Distance computations run at once per nearest search.
    #[serde(default = "default_distance_concurrency")]
    pub distance_concurrency: usize,

    /// Timeout for a single Distance Matrix request, in seconds.
    #[serde(default = "default_distance_timeout_secs")]
    pub distance_timeout_secs: u64,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_maps_api_key: None,
            database_path: default_db_path(),
            dataset_url: default_dataset_url(),
            dataset_row_limit: default_dataset_row_limit(),
            distance_concurrency: default_distance_concurrency(),
            distance_timeout_secs: default_distance_timeout_secs(),
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/truckstop/config.toml
    /// Reads environment variables with TRUCKSTOP_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("truckstop");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    /// The Google Maps API key, if set to something non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.google_maps_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("truckstop")
        .join("truckstop.db")
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

const fn default_dataset_row_limit() -> usize {
    50_000
}

const fn default_distance_concurrency() -> usize {
    8
}

const fn default_distance_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/truckstop/config.toml
/// - macOS: ~/Library/Application Support/truckstop/config.toml
/// - Windows: %APPDATA%\truckstop\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("truckstop")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Truckstop Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TRUCKSTOP_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Google Maps API key for walking distances (Distance Matrix API)
# Without a key, nearest search ranks by straight-line geodesic distance.
#
# Can also be set via:
# - Environment: TRUCKSTOP_GOOGLE_MAPS_API_KEY=your-key-here
#google_maps_api_key = "your-google-maps-api-key-here"

# Path to the SQLite database holding the permit snapshot
#
# Can also be set via:
# - CLI: truckstop --db /custom/path.db serve
# - Environment: TRUCKSTOP_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/truckstop.db"

# Permit dataset endpoint and the number of rows to request from it
#dataset_url = "https://data.sfgov.org/resource/rqzj-sfat.json"
#dataset_row_limit = 50000

# Distance lookups run at once per nearest search, and the timeout
# in seconds for each Distance Matrix request
#distance_concurrency = 8
#distance_timeout_secs = 10

# Address and port the HTTP server binds to
#host = "127.0.0.1"
#port = 8000

# Browser origins allowed to call the API
#cors_origins = ["http://localhost:3000"]
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
