pub mod config;
pub mod fd_limit;
pub mod logger;
pub(crate) mod minfind_toml;
pub mod tempfiles;

pub use config::*;
pub use fd_limit::{max_open_fds, max_workers_by_fd_limit};
pub use logger::setup_logging;
pub use tempfiles::{temp_path_for, write_min_atomic};
