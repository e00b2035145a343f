pub mod ingest;

pub use ingest::{report_outcome, resolve_gameweek, run_ingest, IngestOutcome};
