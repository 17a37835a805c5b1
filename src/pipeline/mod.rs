//! Pipeline components: scan pool, ordered collection, failure reporting.

pub mod error_handler;
pub mod orchestrator;
pub mod workers;

pub use error_handler::report_scan_failures;
pub use orchestrator::{FindMinResult, collect_in_order, find_min_with_opts};
pub use workers::{PendingScan, build_scan_pool, scan_unit, submit_scans};
