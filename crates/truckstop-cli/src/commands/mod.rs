pub mod config;
pub mod ingest;
pub mod serve;
pub mod status;

pub use ingest::run_ingest;
pub use serve::run_serve;
pub use status::show_status;
