//! Index extraction from arbitrary filenames.
//!
//! An index is the first run of ASCII digits found in a filename. A
//! [`FormatHint`] can move the start of the search: only the position of the
//! `{}` placeholder inside the hint matters, everything else in the hint is
//! ignored.
//!
//! # Examples
//!
//! ```
//! use mrename::index::{FormatHint, find_index};
//!
//! assert_eq!(find_index("img007.png", None), Some(7));
//! assert_eq!(find_index("notes.txt", None), None);
//!
//! let hint = FormatHint::new("scan_{}.jpg").unwrap();
//! assert_eq!(find_index("99scan_042.jpg", Some(&hint)), Some(42));
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Placeholder marking the index position inside a format hint.
pub const PLACEHOLDER: &str = "{}";

/// Leading non-digits, then the digit run.
static FIRST_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]*([0-9]+)").expect("valid digit-run regex"));

/// Digit run anchored at the start of the remainder.
static LEADING_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)").expect("valid leading-digit regex"));

/// Errors raised while validating a format hint.
///
/// These are fatal: they are reported before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The hint does not contain the `{}` placeholder.
    #[error("Invalid format '{hint}'. Cannot find {{}}.")]
    MissingPlaceholder {
        /// The rejected hint.
        hint: String,
    },
}

/// A validated format hint.
///
/// Stores how many leading characters of a filename are skipped before
/// the index search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHint {
    skip: usize,
}

impl FormatHint {
    /// Validates `hint` and records the character offset of its placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingPlaceholder`] if `hint` has no `{}`.
    pub fn new(hint: &str) -> Result<Self, FormatError> {
        let byte_offset = hint
            .find(PLACEHOLDER)
            .ok_or_else(|| FormatError::MissingPlaceholder {
                hint: hint.to_string(),
            })?;

        Ok(Self {
            skip: hint[..byte_offset].chars().count(),
        })
    }

    /// Validates an optional hint. Absent and empty hints both mean "no hint".
    pub fn parse_optional(hint: Option<&str>) -> Result<Option<Self>, FormatError> {
        match hint {
            Some(h) if !h.is_empty() => Self::new(h).map(Some),
            _ => Ok(None),
        }
    }

    /// Number of leading filename characters skipped by this hint.
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Returns `filename` without its first `skip` characters.
    fn remainder<'a>(&self, filename: &'a str) -> &'a str {
        match filename.char_indices().nth(self.skip) {
            Some((byte, _)) => &filename[byte..],
            None => "",
        }
    }
}

/// Finds the index in `filename`.
///
/// Without a hint, leading non-digit characters are skipped and the first
/// digit run is parsed. With a hint, the first [`FormatHint::skip`]
/// characters are dropped and the digit run must start right there.
///
/// Returns `None` when no digits are found or the run overflows a `u64`.
/// Leading zeros are accepted (`"007"` is 7).
pub fn find_index(filename: &str, hint: Option<&FormatHint>) -> Option<u64> {
    let captures = match hint {
        Some(hint) => LEADING_DIGIT_RUN.captures(hint.remainder(filename)),
        None => FIRST_DIGIT_RUN.captures(filename),
    }?;

    captures.get(1)?.as_str().parse().ok()
}

/// Same as [`find_index`], taking the hint as a raw string.
///
/// # Errors
///
/// Returns [`FormatError::MissingPlaceholder`] for a non-empty hint
/// without `{}`.
pub fn find_index_with_format(
    filename: &str,
    hint: Option<&str>,
) -> Result<Option<u64>, FormatError> {
    let hint = FormatHint::parse_optional(hint)?;
    Ok(find_index(filename, hint.as_ref()))
}
