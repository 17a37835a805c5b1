//! Engine module: CLI, token scanning, the minimum register

pub mod arg_parser;
pub mod cli;
pub mod parallel;
pub mod progress;
pub mod register;
pub mod scan;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use parallel::{determine_workers, workers_for_inputs};
pub use register::{GlobalMin, Offer};
pub use scan::{TokenMin, min_in_str, parse_number, scan_file};
pub use tools::{format_min, panic_message};
