use crate::ScanTally;

/// Summarise failures after collection. Per-file errors were already logged as they happened.
pub fn report_scan_failures(tally: &ScanTally) {
    if tally.unpersisted > 0 {
        log::warn!(
            "{} of {} improvement(s) could not be written to the output file",
            tally.unpersisted,
            tally.improved
        );
    }
    let lost = tally.lost();
    if lost == 0 {
        log::debug!(
            "All {} input(s) scanned; minimum improved {} time(s)",
            tally.inputs,
            tally.improved
        );
        return;
    }
    log::warn!(
        "{} of {} input(s) did not contribute ({} unreadable, {} without result)",
        lost,
        tally.inputs,
        tally.failed,
        tally.dropped
    );
}
