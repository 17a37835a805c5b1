//! Public and internal types for the minfind API and pipeline.

use crate::utils::config::ScanConsts;

/// Per-file result marking a scan that could not open or read its file.
///
/// NaN compares false against everything, so it can never lower the global minimum.
pub const FAILED_SCAN: f64 = f64::NAN;

/// Detailed result of scanning one file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileScan {
    /// Smallest number seen, or `+inf` when the file held no numbers.
    pub min: f64,
    /// Tokens that parsed as numbers.
    pub numbers: u64,
    /// Tokens that did not parse and were skipped.
    pub skipped: u64,
}

/// Counters for one run, reported once all results are collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanTally {
    pub inputs: usize,
    /// Results that lowered the global minimum.
    pub improved: usize,
    /// Units that returned [`FAILED_SCAN`].
    pub failed: usize,
    /// Units whose result never arrived (the scan panicked).
    pub dropped: usize,
    /// Improvements whose write to the output file failed.
    pub unpersisted: usize,
    /// Whether the output file holds the latest improvement (false until something is written).
    pub output_current: bool,
}

impl ScanTally {
    /// Inputs that did not contribute a result.
    pub fn lost(&self) -> usize {
        self.failed + self.dropped
    }
}

/// Lib-only options for [`find_min`](crate::find_min).
#[derive(Clone, Debug)]
pub struct FindOpts {
    /// Cap on concurrent scan workers. When None, one worker per input (still capped by the FD limit).
    pub max_workers: Option<usize>,
    /// Files larger than this many bytes are memory-mapped instead of read in chunks.
    pub mmap_threshold: u64,
}

impl Default for FindOpts {
    fn default() -> Self {
        Self {
            max_workers: None,
            mmap_threshold: ScanConsts::MMAP_THRESHOLD,
        }
    }
}

impl From<&FindOpts> for Opts {
    fn from(o: &FindOpts) -> Self {
        Opts {
            max_workers: o.max_workers,
            mmap_threshold: o.mmap_threshold,
            verbose: false,
            progress: false,
        }
    }
}

/// Full options (CLI). Use [`FindOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Cap on concurrent scan workers.
    pub max_workers: Option<usize>,
    /// Files larger than this many bytes are memory-mapped.
    pub mmap_threshold: u64,
    /// Debug logging.
    pub verbose: bool,
    /// Show a progress bar over completed files.
    pub progress: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts::from(&FindOpts::default())
    }
}
