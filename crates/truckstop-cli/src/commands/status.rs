use anyhow::Result;
use truckstop_core::schema::Database;
use truckstop_etl::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let db_path = &config.database_path;

    println!("\nTruckstop Status\n");
    println!("  Database: {}", db_path.display());

    if !db_path.exists() {
        println!("\n  No database yet. Run `truckstop ingest` or `truckstop serve`.");
        return Ok(());
    }

    let db = Database::open_read_only(db_path)?;
    let Some(run) = db.latest_ingest()? else {
        println!("\n  Database is empty. Run `truckstop ingest` to populate it.");
        return Ok(());
    };

    println!("  Records: {}", db.record_count()?);
    println!("  Source: {}", run.source);
    println!(
        "  Ingested: {}",
        run.ingested_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!("\n  By status:");
    for (status, count) in db.status_counts()? {
        println!("    {:<12} {}", status, count);
    }

    Ok(())
}
