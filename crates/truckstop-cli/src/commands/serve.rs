use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use truckstop_core::{RecordStore, SqliteStore};
use truckstop_etl::{Config, Ingestor};
use truckstop_search::{
    CompositeProvider, DistanceMatrixClient, NearestSearch, RouteDistance, TextSearch,
};
use truckstop_server::AppState;

/// Make sure the store is populated, then serve the API.
pub async fn run_serve(config: &Config) -> Result<()> {
    Ingestor::from_config(config)
        .ensure_ready()
        .await
        .context("Failed to prepare the record store")?;

    let store: Arc<dyn RecordStore> = Arc::new(SqliteStore::new(&config.database_path));
    let distance = CompositeProvider::new(remote_distance(config)?);
    match distance.remote_name() {
        Some(name) => log::info!("Nearest search uses {} walking distances", name),
        None => log::info!("No Google Maps API key configured; using geodesic distances"),
    }

    let text = TextSearch::new(Arc::clone(&store));
    let nearest = NearestSearch::new(store, Arc::new(distance))
        .with_concurrency(config.distance_concurrency);

    truckstop_server::serve(
        AppState::new(text, nearest),
        &config.host,
        config.port,
        &config.cors_origins,
    )
    .await
}

fn remote_distance(config: &Config) -> Result<Option<Arc<dyn RouteDistance>>> {
    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };

    let client = DistanceMatrixClient::new(
        api_key,
        Duration::from_secs(config.distance_timeout_secs),
        config.distance_concurrency,
    )
    .context("Failed to create Distance Matrix client")?;

    let remote: Arc<dyn RouteDistance> = Arc::new(client);
    Ok(Some(remote))
}
