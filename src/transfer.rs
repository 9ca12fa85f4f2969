/// Rename and copy operations for indexed files.
///
/// This module applies the naming rules of [`crate::naming`] to single files
/// and to whole directories. Per-file skips (already formatted, no index,
/// target exists) are reported as an [`Outcome`], never as an error. Only
/// failures of the filesystem calls themselves surface as [`TransferError`].
use crate::index::FormatHint;
use crate::naming::{formatted_filename, is_formatted};
use crate::scanner::list_candidates;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result of a single rename or copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was renamed in place.
    Renamed,
    /// The file was copied to the destination directory.
    Copied,
    /// The name already follows the `<prefix><integer>` convention.
    AlreadyFormatted,
    /// No index could be found in the filename.
    NoIndex,
    /// The computed name equals the current one.
    SameName,
    /// A file already exists at the target path.
    TargetExists,
}

impl Outcome {
    /// Returns true if the file was renamed or copied.
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Renamed | Outcome::Copied)
    }

    /// Short human-readable reason, used in verbose output.
    pub fn describe(self) -> &'static str {
        match self {
            Outcome::Renamed => "renamed",
            Outcome::Copied => "copied",
            Outcome::AlreadyFormatted => "already formatted",
            Outcome::NoIndex => "no index found",
            Outcome::SameName => "name unchanged",
            Outcome::TargetExists => "target already exists",
        }
    }
}

/// Aggregate result of a bulk operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferCounts {
    /// Files renamed or copied.
    pub succeeded: usize,
    /// Files left untouched, for any reason.
    pub skipped: usize,
}

impl TransferCounts {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped
    }

    /// Tallies one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Result of a top-level [`rename`] or [`copy`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// A directory was processed.
    Bulk(TransferCounts),
    /// A single file was processed.
    Single(Outcome),
}

/// Filesystem failures that abort a run.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The directory could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The rename call itself failed.
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The copy call itself failed.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Renames a single file to its canonical name.
///
/// Nothing happens if the file is already formatted, has no index, or if the
/// target exists. The returned [`Outcome`] tells which case applied.
///
/// # Examples
///
/// ```no_run
/// use mrename::transfer::{Outcome, rename_one};
/// use std::path::Path;
///
/// let outcome = rename_one(Path::new("scans/img7.png"), "page", None).unwrap();
/// assert_eq!(outcome, Outcome::Renamed); // scans/page07.png
/// ```
pub fn rename_one(path: &Path, prefix: &str, hint: Option<&FormatHint>) -> TransferResult<Outcome> {
    if is_formatted(path, prefix) {
        debug!("{}: already formatted", path.display());
        return Ok(Outcome::AlreadyFormatted);
    }

    let Some(name) = formatted_filename(path, prefix, hint) else {
        debug!("{}: no index found", path.display());
        return Ok(Outcome::NoIndex);
    };

    let new_path = path.with_file_name(&name);
    if new_path == path {
        return Ok(Outcome::SameName);
    }
    if new_path.exists() {
        debug!("{}: {} already exists", path.display(), new_path.display());
        return Ok(Outcome::TargetExists);
    }

    fs::rename(path, &new_path).map_err(|e| TransferError::Rename {
        from: path.to_path_buf(),
        to: new_path.clone(),
        source: e,
    })?;
    info!("Renamed {} -> {}", path.display(), new_path.display());

    Ok(Outcome::Renamed)
}

/// Copies a single file into `dest_dir` under its canonical name.
///
/// An already formatted file keeps its current name. An existing file at
/// the destination is never overwritten.
pub fn copy_one(
    src: &Path,
    dest_dir: &Path,
    prefix: &str,
    hint: Option<&FormatHint>,
) -> TransferResult<Outcome> {
    let name = match src.file_name() {
        Some(name) if is_formatted(src, prefix) => name.to_os_string(),
        _ => match formatted_filename(src, prefix, hint) {
            Some(name) => name,
            None => {
                debug!("{}: no index found", src.display());
                return Ok(Outcome::NoIndex);
            }
        },
    };

    let dest_path = dest_dir.join(&name);
    if dest_path.exists() {
        debug!("{}: {} already exists", src.display(), dest_path.display());
        return Ok(Outcome::TargetExists);
    }

    fs::copy(src, &dest_path).map_err(|e| TransferError::Copy {
        from: src.to_path_buf(),
        to: dest_path.clone(),
        source: e,
    })?;
    info!("Copied {} -> {}", src.display(), dest_path.display());

    Ok(Outcome::Copied)
}

/// Renames every candidate file in `dir`.
pub fn rename_all(dir: &Path, prefix: &str, hint: Option<&FormatHint>) -> TransferResult<TransferCounts> {
    rename_candidates(&list_candidates(dir)?, prefix, hint, |_, _| {})
}

/// Renames each file of an already listed `candidates` slice, calling
/// `observer` after each one.
pub fn rename_candidates<F>(
    candidates: &[PathBuf],
    prefix: &str,
    hint: Option<&FormatHint>,
    mut observer: F,
) -> TransferResult<TransferCounts>
where
    F: FnMut(&Path, Outcome),
{
    let mut counts = TransferCounts::default();
    for path in candidates {
        let outcome = rename_one(path, prefix, hint)?;
        counts.record(outcome);
        observer(path, outcome);
    }
    Ok(counts)
}

/// Copies every candidate file of `src_dir` into `dest_dir`.
pub fn copy_all(
    src_dir: &Path,
    dest_dir: &Path,
    prefix: &str,
    hint: Option<&FormatHint>,
) -> TransferResult<TransferCounts> {
    copy_candidates(&list_candidates(src_dir)?, dest_dir, prefix, hint, |_, _| {})
}

/// Copies each file of an already listed `candidates` slice into
/// `dest_dir`, calling `observer` after each one.
pub fn copy_candidates<F>(
    candidates: &[PathBuf],
    dest_dir: &Path,
    prefix: &str,
    hint: Option<&FormatHint>,
    mut observer: F,
) -> TransferResult<TransferCounts>
where
    F: FnMut(&Path, Outcome),
{
    let mut counts = TransferCounts::default();
    for path in candidates {
        let outcome = copy_one(path, dest_dir, prefix, hint)?;
        counts.record(outcome);
        observer(path, outcome);
    }
    Ok(counts)
}

/// Renames a directory's files, or a single file, depending on `path`.
pub fn rename(path: &Path, prefix: &str, hint: Option<&FormatHint>) -> TransferResult<Report> {
    if path.is_dir() {
        rename_all(path, prefix, hint).map(Report::Bulk)
    } else {
        rename_one(path, prefix, hint).map(Report::Single)
    }
}

/// Copies a directory's files, or a single file, into `dest_dir`.
pub fn copy(
    src: &Path,
    dest_dir: &Path,
    prefix: &str,
    hint: Option<&FormatHint>,
) -> TransferResult<Report> {
    if src.is_dir() {
        copy_all(src, dest_dir, prefix, hint).map(Report::Bulk)
    } else {
        copy_one(src, dest_dir, prefix, hint).map(Report::Single)
    }
}
