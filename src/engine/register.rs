//! The shared global-minimum register and its compare-and-persist step.

use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::engine::tools::format_min;
use crate::utils::tempfiles::write_min_atomic;

/// What [`GlobalMin::offer`] did with a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offer {
    /// The candidate lowered the minimum. `persisted` is false when the output write failed.
    Improved { value: f64, persisted: bool },
    /// Not strictly lower than the current minimum.
    NotLower,
    /// The failure sentinel (NaN); never stored.
    Sentinel,
}

/// Best-known minimum across the files processed so far, written to `output` on every improvement.
///
/// The lock covers both the comparison and the file write, so writes to `output` never overlap.
pub struct GlobalMin {
    value: Mutex<Option<f64>>,
    output: PathBuf,
}

impl GlobalMin {
    pub fn new(output: &Path) -> Self {
        Self {
            value: Mutex::new(None),
            output: output.to_path_buf(),
        }
    }

    /// Compare `candidate` with the current minimum; store and persist it when strictly lower
    /// (or when nothing is stored yet). A write failure is logged and the in-memory value still
    /// advances.
    pub fn offer(&self, candidate: f64) -> Offer {
        if candidate.is_nan() {
            return Offer::Sentinel;
        }
        let mut current = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        let lower = match *current {
            None => true,
            Some(best) => candidate < best,
        };
        if !lower {
            return Offer::NotLower;
        }
        *current = Some(candidate);
        let persisted = match write_min_atomic(&self.output, candidate) {
            Ok(()) => {
                debug!(
                    "New minimum {} written to {}",
                    format_min(candidate),
                    self.output.display()
                );
                true
            }
            Err(e) => {
                error!("Failed to write minimum to {}: {:#}", self.output.display(), e);
                false
            }
        };
        Offer::Improved {
            value: candidate,
            persisted,
        }
    }

    /// Snapshot of the current minimum.
    pub fn current(&self) -> Option<f64> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> Option<f64> {
        self.value
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
