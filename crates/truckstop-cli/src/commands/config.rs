use anyhow::{Context, Result};
use truckstop_etl::{config, Config};

const KEYS: &str = "google_maps_api_key, database_path, dataset_url, dataset_row_limit, \
                    distance_concurrency, distance_timeout_secs, host, port, cors_origins";

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!(
        "  google_maps_api_key: {}",
        if config.api_key().is_some() {
            "<set>"
        } else {
            "<not set>"
        }
    );
    println!("  database_path: {}", config.database_path.display());
    println!("  dataset_url: {}", config.dataset_url);
    println!("  dataset_row_limit: {}", config.dataset_row_limit);
    println!("  distance_concurrency: {}", config.distance_concurrency);
    println!("  distance_timeout_secs: {}", config.distance_timeout_secs);
    println!("  host: {}", config.host);
    println!("  port: {}", config.port);
    println!("  cors_origins: {}", config.cors_origins.join(", "));

    println!("\nPriority: CLI args > ENV vars (TRUCKSTOP_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    let Some(key) = key else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'truckstop config init' to create it.");
        }
        return Ok(());
    };

    println!("{}", config_value(config, &key)?);
    Ok(())
}

/// The effective value of one config key, formatted for display.
fn config_value(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "google_maps_api_key" => config.api_key().unwrap_or("<not set>").to_string(),
        "database_path" => config.database_path.display().to_string(),
        "dataset_url" => config.dataset_url.clone(),
        "dataset_row_limit" => config.dataset_row_limit.to_string(),
        "distance_concurrency" => config.distance_concurrency.to_string(),
        "distance_timeout_secs" => config.distance_timeout_secs.to_string(),
        "host" => config.host.clone(),
        "port" => config.port.to_string(),
        "cors_origins" => config.cors_origins.join(", "),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
    };
    Ok(value)
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("Created config file: {}", config_path.display());
        println!("\nEdit this file to configure truckstop.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
