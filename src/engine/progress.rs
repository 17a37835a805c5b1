//! Progress bar utilities for displaying scan status

use kdam::{Animation, Bar, BarExt};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )
}

/// Bar over `total` collected files when `enabled`; None otherwise.
pub fn setup_progress(enabled: bool, total: usize) -> Option<Bar> {
    enabled.then(|| {
        let mut bar =
            create_progress_bar(ProgressBarConfig::new(total, "Scanning", Animation::Classic));
        let _ = bar.refresh();
        bar
    })
}

/// Advance the bar by one file if there is one.
pub fn advance(bar: &mut Option<Bar>) {
    if let Some(bar) = bar {
        let _ = bar.update(1);
    }
}

/// Final refresh and line break so later log lines start clean.
pub fn finish_progress(bar: Option<Bar>) {
    if let Some(mut bar) = bar {
        let _ = bar.refresh();
        eprintln!();
    }
}
