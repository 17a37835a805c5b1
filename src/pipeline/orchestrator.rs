use anyhow::Result;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

use crate::engine::parallel::determine_workers;
use crate::engine::progress::{advance, finish_progress, setup_progress};
use crate::engine::register::{GlobalMin, Offer};
use crate::pipeline::error_handler::report_scan_failures;
use crate::pipeline::workers::{PendingScan, build_scan_pool, submit_scans};
use crate::{Opts, ScanTally};

/// Result of [`find_min_with_opts`]: (final minimum, run counters).
pub type FindMinResult = (Option<f64>, ScanTally);

/// Main orchestrator: scan every input in parallel, then fold the per-file minima into the
/// global minimum in input order, persisting each improvement to `output`.
/// The minimum is `None` when no input produced a usable result.
pub fn find_min_with_opts(
    inputs: &[PathBuf],
    output: &Path,
    opts: &Opts,
) -> Result<FindMinResult> {
    if inputs.is_empty() {
        warn!("No input files given");
        return Ok((None, ScanTally::default()));
    }

    let workers = determine_workers(inputs.len(), opts.max_workers);
    let pool = build_scan_pool(workers)?;
    let pending = submit_scans(&pool, inputs, opts.mmap_threshold);

    let register = GlobalMin::new(output);
    let tally = collect_in_order(pending, &register, opts.progress);

    // No new scans after this; queued ones still run to completion.
    drop(pool);
    debug!("main: all results collected, scan pool released");

    report_scan_failures(&tally);
    Ok((register.into_inner(), tally))
}

/// Block on each pending scan in submission order and offer its result to `register`.
pub fn collect_in_order(
    pending: Vec<PendingScan>,
    register: &GlobalMin,
    progress: bool,
) -> ScanTally {
    let mut tally = ScanTally {
        inputs: pending.len(),
        ..ScanTally::default()
    };
    let mut bar = setup_progress(progress, pending.len());

    for PendingScan { path, result_rx } in pending {
        match result_rx.recv() {
            Ok(file_min) => match register.offer(file_min) {
                Offer::Improved { persisted, .. } => {
                    tally.improved += 1;
                    if !persisted {
                        tally.unpersisted += 1;
                    }
                    tally.output_current = persisted;
                }
                Offer::NotLower => {}
                Offer::Sentinel => tally.failed += 1,
            },
            Err(_) => {
                error!("No result for {}: scan ended without reporting", path.display());
                tally.dropped += 1;
            }
        }
        advance(&mut bar);
    }

    finish_progress(bar);
    tally
}
