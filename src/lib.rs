//! minfind: global minimum across many text files, scanned in parallel

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::{Path, PathBuf};

/// Result alias used by public minfind API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: scan `inputs` concurrently and keep `output` holding the lowest number
/// seen so far.
///
/// - Each input is scanned by its own unit of work; unreadable files are logged and skipped.
/// - Results are folded in input order. Every strict improvement rewrites `output` with one line.
/// - Returns the final minimum, or `None` when no input could be read (`output` is then untouched).
///   A file without numbers contributes `+inf`.
///
/// ```ignore
/// let inputs = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
/// let min = minfind::find_min(&inputs, Path::new("out.txt"), &FindOpts::default())?;
/// ```
pub fn find_min(inputs: &[PathBuf], output: &Path, opts: &FindOpts) -> Result<Option<f64>> {
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    let (min, _tally) = pipeline::find_min_with_opts(inputs, output, &opts)?;
    Ok(min)
}
