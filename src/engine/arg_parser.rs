use clap::Parser;
use std::path::PathBuf;

/// Find the smallest number across many text files, scanning them in parallel.
#[derive(Clone, Debug, Parser)]
#[command(name = "minfind", version)]
#[command(
    about = "Write the global minimum of all numbers in INPUT files to OUTPUT, updating it whenever a lower value is found."
)]
pub struct Cli {
    /// File that receives the current global minimum (overwritten on every improvement).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Text files to scan. Whitespace-separated tokens that parse as numbers are candidates.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Maximum number of concurrent scan workers. Default: one per input file.
    #[arg(long, short = 'j', value_parser = clap::value_parser!(usize))]
    pub max_workers: Option<usize>,

    /// Verbose output. Takes `=false` to switch off a setting from the config file.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Show a progress bar over completed files.
    #[arg(long, short = 'p', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,
}
