pub mod coordinate;
pub mod ingest_run;
pub mod record;

pub use coordinate::Coordinate;
pub use ingest_run::IngestRun;
pub use record::{
    normalize_address, normalize_operator, normalize_status, VendingRecord, STATUS_APPROVED,
};
