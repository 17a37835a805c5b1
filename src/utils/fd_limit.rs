//! Open-file budget for the scan pool (Unix).
//!
//! A scan worker keeps exactly one input open for the duration of a scan (as a buffered reader,
//! or as the file backing a memory map). The orchestrator adds at most two more at a time: the
//! `<output>.tmp` being written and the output it replaces. The worker count is derived from what
//! RLIMIT_NOFILE leaves after that.

use crate::utils::config::FDS_PER_WORKER;

/// Share of RLIMIT_NOFILE handed to scan workers; stdio, the output pair and descriptors held by
/// the embedding process live in the remainder.
const SCAN_FD_SHARE: f64 = 0.8;

/// Soft RLIMIT_NOFILE, or `None` when it is unlimited or cannot be read.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let soft = unsafe { rlim.assume_init() }.rlim_cur;
    (soft != libc::RLIM_INFINITY && soft <= i64::MAX as u64).then_some(soft)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// How many inputs may be open at once. `None` leaves the pool at one worker per input.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let soft = max_open_fds()?;
    let for_scans = (soft as f64 * SCAN_FD_SHARE) as usize;
    Some((for_scans / FDS_PER_WORKER).max(1))
}
