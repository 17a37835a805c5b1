//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    temp_suffix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                temp_suffix: "tmp".to_string(),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory settings file (e.g. `.minfind.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Extension appended to the output path while a new minimum is being written.
    pub fn temp_suffix(&self) -> &str {
        &self.temp_suffix
    }

    /// Name given to scan worker thread `index`.
    pub fn worker_thread_name(&self, index: usize) -> String {
        format!("{}-scan-{}", self.pkg_name, index)
    }
}

// ---- Scanning ----

/// Scanner I/O thresholds and buffer sizes.
pub struct ScanConsts;

impl ScanConsts {
    /// File size above which scanning uses memory-mapped I/O (bytes). 64 MB.
    pub const MMAP_THRESHOLD: u64 = 64 * 1024 * 1024;
    /// Chunk size for buffered reads below the mmap threshold (bytes). 64 KB.
    pub const READ_CHUNK_SIZE: usize = 64 * 1024;
}

// ---- Worker threads ----

/// Descriptors budgeted per scan worker: its open input, plus headroom for the mapping on
/// platforms that keep a separate handle for it.
pub const FDS_PER_WORKER: usize = 2;
