//! Candidate discovery for bulk operations.

use crate::transfer::TransferError;
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the files of `dir` eligible for renaming or copying.
///
/// Only direct children are returned. Directories (including symlinks to
/// directories) and names starting with `.` are left out. The order is the
/// one the OS returns.
///
/// # Errors
///
/// Returns [`TransferError::ReadDir`] if `dir` cannot be listed.
pub fn list_candidates(dir: &Path) -> Result<Vec<PathBuf>, TransferError> {
    let entries = fs::read_dir(dir).map_err(|e| TransferError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            trace!("Ignoring hidden entry {}", path.display());
            continue;
        }
        if path.is_dir() {
            trace!("Ignoring directory {}", path.display());
            continue;
        }
        candidates.push(path);
    }

    Ok(candidates)
}
