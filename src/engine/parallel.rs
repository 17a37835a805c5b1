//! Worker count for the scan pool.

use log::debug;

use crate::utils::fd_limit::max_workers_by_fd_limit;

/// One worker per input, capped by `max_workers` (when set) and by `fd_cap` (when known). Never 0.
pub fn workers_for_inputs(
    inputs: usize,
    max_workers: Option<usize>,
    fd_cap: Option<usize>,
) -> usize {
    let mut workers = inputs.max(1);
    if let Some(cap) = max_workers
        && cap < workers
    {
        debug!("Capping workers {} -> {} (max_workers)", workers, cap);
        workers = cap;
    }
    if let Some(cap) = fd_cap
        && cap < workers
    {
        debug!("Capping workers {} -> {} (FD limit ~80%)", workers, cap);
        workers = cap;
    }
    workers.max(1)
}

/// [`workers_for_inputs`] with the process FD limit.
pub fn determine_workers(inputs: usize, max_workers: Option<usize>) -> usize {
    let workers = workers_for_inputs(inputs, max_workers, max_workers_by_fd_limit());
    debug!("Scan workers: {} for {} input(s)", workers, inputs);
    workers
}
