//! mrename - Rename indexed files into a consistent naming scheme
//!
//! This library finds the numeric index already present in each filename,
//! computes the canonical `<prefix><NN><ext>` name, and renames or copies the
//! files of a directory accordingly. Files that are already named correctly,
//! that carry no index, or whose target name is taken are skipped.

pub mod cli;
pub mod config;
pub mod index;
pub mod naming;
pub mod output;
pub mod scanner;
pub mod transfer;

pub use config::{ConfigError, Settings, resolve_option};
pub use index::{FormatError, FormatHint, find_index};
pub use naming::{formatted_filename, is_formatted};
pub use scanner::list_candidates;
pub use transfer::{
    Outcome, Report, TransferCounts, TransferError, copy, copy_all, copy_one, rename, rename_all,
    rename_one,
};

pub use cli::{Args, CliError, run_cli};
