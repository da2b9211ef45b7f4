//! Write rendered calendars to disk.
//!
//! Every file is first written to a `.tmp` sibling; the final names only
//! appear once all of them were written, so a failed run leaves no partial
//! set of calendars behind.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Write one calendar file, replacing any existing one.
pub fn write_calendar(path: &Path, contents: &str) -> Result<(), AppError> {
    write_calendars(&[(path, contents)])
}

/// Write several calendar files as a unit.
pub fn write_calendars(calendars: &[(&Path, &str)]) -> Result<(), AppError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(calendars.len());
    for &(path, contents) in calendars {
        match stage(path, contents) {
            Ok(tmp) => staged.push((tmp, path)),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }

    for (idx, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            discard(&staged[idx..]);
            return Err(AppError::config(format!(
                "Failed to move calendar into place at '{}': {e}",
                path.display()
            )));
        }
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn stage(path: &Path, contents: &str) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config(format!(
                "Failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let tmp = staging_path(path);
    let mut file = File::create(&tmp).map_err(|e| {
        AppError::config(format!("Failed to create calendar '{}': {e}", tmp.display()))
    })?;
    if let Err(e) = file.write_all(contents.as_bytes()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(AppError::config(format!(
            "Failed to write calendar '{}': {e}",
            tmp.display()
        )));
    }
    log::debug!("staged {} ({} bytes)", tmp.display(), contents.len());
    Ok(tmp)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(e) = std::fs::remove_file(tmp) {
            log::warn!("could not remove {}: {e}", tmp.display());
        }
    }
}
