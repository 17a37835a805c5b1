use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::format_min;
use crate::utils::config::PackagePaths;

/// Temp path next to `output` (same directory, so the final rename stays on one filesystem).
pub fn temp_path_for(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| PackagePaths::get().pkg_name().to_string());
    output
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.{}", PackagePaths::get().temp_suffix()))
}

fn write_value(mut file: File, path: &Path, value: f64) -> Result<()> {
    writeln!(file, "{}", format_min(value))
        .and_then(|_| file.flush())
        .with_context(|| format!("write {}", path.display()))
}

fn write_in_place(path: &Path, value: f64) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_value(file, path, value)
}

/// Replace `output` with a single line holding `value`.
/// Writes to a temp file and renames it over `output`; when the temp file cannot be created for
/// lack of permission, truncates and writes `output` directly.
pub fn write_min_atomic(output: &Path, value: f64) -> Result<()> {
    let temp_path = temp_path_for(output);
    let file = match File::create(&temp_path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            log::debug!(
                "No permission for temp file {}; writing {} in place",
                temp_path.display(),
                output.display()
            );
            return write_in_place(output, value);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("create temp file {}", temp_path.display()));
        }
    };
    if let Err(e) = write_value(file, &temp_path, value) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp_path, output) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| {
            format!(
                "atomic rename temp output to final path ({} -> {})",
                temp_path.display(),
                output.display()
            )
        });
    }
    Ok(())
}
