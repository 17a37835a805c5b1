use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, bounded};
use log::{debug, error};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::{Path, PathBuf};

use crate::FAILED_SCAN;
use crate::engine::scan::scan_file;
use crate::engine::tools::{format_min, panic_message};
use crate::utils::config::PackagePaths;

/// A submitted scan: the input it covers and the one-slot channel its result arrives on.
/// The channel closes without a value if the scan panicked.
pub struct PendingScan {
    pub path: PathBuf,
    pub result_rx: Receiver<f64>,
}

/// Fixed-size pool for scan units. Dropping it shuts the pool down once queued scans finish;
/// running scans are never cancelled.
pub fn build_scan_pool(num_threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| PackagePaths::get().worker_thread_name(i))
        .panic_handler(|payload| error!("Scan worker panicked: {}", panic_message(&*payload)))
        .build()
        .with_context(|| format!("start scan pool with {num_threads} worker(s)"))
}

/// One unit of work: the file's minimum, `+inf` when it has no numbers, [`FAILED_SCAN`] when it
/// could not be read. Read errors are logged here and never propagate.
pub fn scan_unit(path: &Path, mmap_threshold: u64) -> f64 {
    match scan_file(path, mmap_threshold) {
        Ok(scan) => {
            debug!(
                "{}: min {} ({} numbers, {} skipped tokens)",
                path.display(),
                format_min(scan.min),
                scan.numbers,
                scan.skipped
            );
            scan.min
        }
        Err(e) => {
            error!("Failed to read {}: {:#}", path.display(), e);
            FAILED_SCAN
        }
    }
}

/// Queue one scan per input on `pool`. Returned in input order.
pub fn submit_scans(
    pool: &ThreadPool,
    inputs: &[PathBuf],
    mmap_threshold: u64,
) -> Vec<PendingScan> {
    inputs
        .iter()
        .map(|path| {
            let (result_tx, result_rx) = bounded::<f64>(1);
            let unit_path = path.clone();
            pool.spawn(move || {
                let _ = result_tx.send(scan_unit(&unit_path, mmap_threshold));
            });
            PendingScan {
                path: path.clone(),
                result_rx,
            }
        })
        .collect()
}
