/// Target-name computation for indexed files.
///
/// Files are renamed to `<prefix><index><extension>`, with the index
/// zero-padded to at least two digits. Only the final extension is kept:
/// `archive_3.tar.gz` becomes `<prefix>03.gz`. The extension is copied as
/// raw OS bytes, so names that are not valid UTF-8 keep their extension intact.
use crate::index::{FormatHint, find_index};
use std::ffi::OsString;
use std::path::Path;

/// Splits a filename into its stem and final extension (dot included).
///
/// A leading dot never starts an extension. A trailing dot stays in the
/// stem and the extension is empty.
///
/// # Examples
///
/// ```
/// use mrename::naming::split_name;
///
/// assert_eq!(split_name("img003.png"), ("img003", ".png"));
/// assert_eq!(split_name("backup.tar.gz"), ("backup.tar", ".gz"));
/// assert_eq!(split_name(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_name("README"), ("README", ""));
/// assert_eq!(split_name("p3."), ("p3.", ""));
/// ```
pub fn split_name(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < filename.len() => filename.split_at(dot),
        _ => (filename, ""),
    }
}

/// Returns the final path component as UTF-8 (lossy).
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Returns true if `s` is an integer literal: an optional sign followed by
/// at least one ASCII digit.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Checks whether `path` already follows the `<prefix><integer>` convention.
///
/// The stem must start with `prefix` and the rest of the stem must be an
/// integer. The extension is not inspected.
///
/// # Examples
///
/// ```
/// use mrename::naming::is_formatted;
/// use std::path::Path;
///
/// assert!(is_formatted(Path::new("photo07.png"), "photo"));
/// assert!(is_formatted(Path::new("photo123.png"), "photo"));
/// assert!(!is_formatted(Path::new("photo.png"), "photo"));
/// assert!(!is_formatted(Path::new("photo07b.png"), "photo"));
/// ```
pub fn is_formatted(path: &Path, prefix: &str) -> bool {
    let name = file_name(path);
    let (stem, _) = split_name(&name);
    stem.strip_prefix(prefix).is_some_and(is_integer_literal)
}

/// Computes the canonical name of `path`, or `None` if no index is found.
///
/// The index is searched in the lossy UTF-8 form of the name; the extension
/// is taken from the raw name.
pub fn formatted_filename(
    path: &Path,
    prefix: &str,
    hint: Option<&FormatHint>,
) -> Option<OsString> {
    let index = find_index(&file_name(path), hint)?;

    let mut target = OsString::from(format!("{prefix}{index:02}"));
    if let Some(extension) = path.extension().filter(|ext| !ext.is_empty()) {
        target.push(".");
        target.push(extension);
    }
    Some(target)
}
