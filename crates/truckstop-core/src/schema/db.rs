use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{IngestRun, VendingRecord};

use super::migrations::MIGRATIONS;

const RECORD_COLUMNS: &str = "operator_name, address, status, latitude, longitude";

/// A database connection with the record and ingest-run queries.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an existing database without write access.
    ///
    /// No migrations are applied; the file must already have been created
    /// by [`Database::open`].
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotReady(format!(
                "database {} does not exist",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        // Create migrations table if it doesn't exist
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        // Get applied migrations
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Apply pending migrations
        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Ingest
impl Database {
    /// Replace every stored record with `records` and log an ingest run.
    ///
    /// Runs in a single transaction: readers see either the previous
    /// snapshot or the new one, never a mix.
    pub fn replace_records(&self, records: &[VendingRecord], source: &str) -> Result<IngestRun> {
        let run = IngestRun::new(source, records.len());
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM vending_records", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO vending_records (operator_name, address, status, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.operator_name,
                    record.address,
                    record.status,
                    record.latitude,
                    record.longitude,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO ingest_runs (source, record_count, ingested_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                run.source,
                i64::try_from(run.record_count).unwrap_or(i64::MAX),
                run.ingested_at.to_rfc3339(),
            ],
        )?;
        tx.commit()?;

        Ok(run)
    }

    /// The most recent ingest run, if the store was ever populated.
    pub fn latest_ingest(&self) -> Result<Option<IngestRun>> {
        let run = self
            .conn
            .query_row(
                "SELECT source, record_count, ingested_at
                 FROM ingest_runs
                 ORDER BY id DESC
                 LIMIT 1",
                [],
                |row| self.row_to_ingest_run(row),
            )
            .optional()?;
        Ok(run)
    }

    fn row_to_ingest_run(&self, row: &rusqlite::Row) -> rusqlite::Result<IngestRun> {
        use chrono::DateTime;

        let source: String = row.get(0)?;
        let record_count: i64 = row.get(1)?;
        let ingested_at_str: String = row.get(2)?;

        let ingested_at = DateTime::parse_from_rfc3339(&ingested_at_str)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?
            .into();

        Ok(IngestRun {
            source,
            record_count: usize::try_from(record_count).unwrap_or(0),
            ingested_at,
        })
    }
}

// Record queries
impl Database {
    /// Total number of stored records.
    pub fn record_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM vending_records", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Record counts per status, most common first.
    pub fn status_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            "SELECT status, COUNT(*) AS n
             FROM vending_records
             GROUP BY status
             ORDER BY n DESC, status",
        )?;

        let counts = stmt
            .query_map([], |row| {
                let status: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((status, usize::try_from(count).unwrap_or(0)))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }

    /// Records whose operator name contains `term`, optionally with an exact
    /// status. Both arguments must already be in canonical case.
    pub fn find_by_operator_substring(
        &self,
        term: &str,
        status: Option<&str>,
    ) -> Result<Vec<VendingRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS}
             FROM vending_records
             WHERE instr(operator_name, ?1) > 0
               AND (?2 IS NULL OR status = ?2)
             ORDER BY id"
        ))?;

        let records = stmt
            .query_map(rusqlite::params![term, status], |row| {
                self.row_to_record(row)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Records whose address contains `term` (already upper-case).
    pub fn find_by_address_substring(&self, term: &str) -> Result<Vec<VendingRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS}
             FROM vending_records
             WHERE instr(address, ?1) > 0
             ORDER BY id"
        ))?;

        let records = stmt
            .query_map([term], |row| self.row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Every record, or only those with exactly `status`, in scan order.
    pub fn all_with_status(&self, status: Option<&str>) -> Result<Vec<VendingRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS}
             FROM vending_records
             WHERE ?1 IS NULL OR status = ?1
             ORDER BY id"
        ))?;

        let records = stmt
            .query_map([status], |row| self.row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn row_to_record(&self, row: &rusqlite::Row) -> rusqlite::Result<VendingRecord> {
        Ok(VendingRecord {
            operator_name: row.get(0)?,
            address: row.get(1)?,
            status: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            distance: None,
        })
    }
}
