use std::path::PathBuf;

use anyhow::{Context, Result};
use truckstop_etl::{Config, DatasetSource, IngestOutcome, Ingestor};

pub async fn run_ingest(config: &Config, force: bool, from_file: Option<PathBuf>) -> Result<()> {
    let mut ingestor = Ingestor::from_config(config);
    if let Some(path) = from_file {
        ingestor = ingestor.with_source(DatasetSource::File(path));
    }

    let result = if force {
        ingestor.run().await
    } else {
        ingestor.ensure_ready().await
    };
    let outcome = result.context("Ingest failed")?;

    let run = outcome.run();
    match &outcome {
        IngestOutcome::Skipped(_) => {
            println!("\nRecord store already populated\n");
            println!("  Records: {}", run.record_count);
            println!("  Source: {}", run.source);
            println!("\n  Run `truckstop ingest --force` to replace it");
        }
        IngestOutcome::Ingested { dropped, .. } => {
            println!("\nIngest complete\n");
            println!("  Records stored: {}", run.record_count);
            println!("  Rows dropped: {}", dropped);
            println!("  Source: {}", run.source);
            println!("  Database: {}", ingestor.db_path().display());
        }
    }

    Ok(())
}
