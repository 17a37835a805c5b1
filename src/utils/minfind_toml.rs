//! Load `.minfind.toml` from a directory (CLI only). Lib callers pass options via `FindOpts`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MinfindToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    max_workers: Option<usize>,
    verbose: Option<bool>,
    progress: Option<bool>,
    mmap_threshold: Option<u64>,
}

/// Parse the contents of a settings file.
pub(crate) fn parse_minfind_toml(s: &str) -> Result<MinfindToml> {
    Ok(toml::from_str(s)?)
}

/// Load the settings file from `dir`. `Ok(None)` when the file is missing; `Err` when it exists
/// but cannot be read or parsed (the caller decides whether that is fatal).
pub(crate) fn load_minfind_toml(dir: &Path) -> Result<Option<MinfindToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse_minfind_toml(&s)
        .with_context(|| format!("parse {}", path.display()))
        .map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &MinfindToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(n) = s.max_workers {
        opts.max_workers = Some(n);
    }
    apply_file_opt!(s, opts, verbose);
    apply_file_opt!(s, opts, progress);
    apply_file_opt!(s, opts, mmap_threshold);
}
