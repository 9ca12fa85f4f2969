//! Command-line interface module for mrename.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Merging command-line options over the `.mrename.json` defaults
//! - Destination directory preparation for copy mode
//! - Dispatching rename and copy runs and reporting their outcome

use crate::config::{self, ConfigError, Options, Settings};
use crate::index::{FormatError, FormatHint};
use crate::output::{Action, OutputFormatter};
use crate::scanner::list_candidates;
use crate::transfer::{self, Outcome, Report, TransferError};
use clap::Parser;
use indicatif::ProgressBar;
use log::{LevelFilter, debug, trace};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rename indexed files. Options given on the command line override those
/// in `.mrename.json`.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, name = "mrename")]
pub struct Args {
    /// The file to rename, or the directory containing the files to rename
    #[arg(default_value = ".", value_hint = clap::ValueHint::AnyPath)]
    pub path: PathBuf,

    /// The prefix of the renamed file(s)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Position of the index in the filenames, marked with '{}'. Useful to
    /// disregard a number that comes before the index
    #[arg(short, long)]
    pub format: Option<String>,

    /// Copy the renamed files to the destination given with --dest
    #[arg(short, long, overrides_with = "no_copy")]
    pub copy: bool,

    /// Do not copy, even if the config file enables copying
    #[arg(long, overrides_with = "copy")]
    pub no_copy: bool,

    /// The directory in which the files are copied (created if missing)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub dest: Option<String>,

    /// Rename the file(s) in place even when copying
    #[arg(long)]
    pub force: bool,

    /// Read options from this JSON file instead of <PATH>/.mrename.json
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print more details (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// The subset of arguments that can also come from the config file.
#[derive(Debug, Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dest: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    force: Option<bool>,
}

impl Args {
    /// Options explicitly given on the command line.
    ///
    /// Flags that were not passed are left out so the config file can
    /// provide them.
    pub fn overrides(&self) -> Options {
        let copy = if self.copy {
            Some(true)
        } else if self.no_copy {
            Some(false)
        } else {
            None
        };

        let overrides = Overrides {
            prefix: self.prefix.as_deref(),
            format: self.format.as_deref(),
            copy,
            dest: self.dest.as_deref(),
            force: self.force.then_some(true),
        };

        match serde_json::to_value(overrides) {
            Ok(Value::Object(map)) => map,
            _ => Options::new(),
        }
    }
}

/// Fatal errors reported by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("The specified file/directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("Please provide a prefix with '-p' or in a .mrename.json file.")]
    MissingPrefix,
    #[error("Please provide a destination directory with '-d' or in a .mrename.json file.")]
    MissingDestination,
    #[error("The destination directory specified is a file: {}", .0.display())]
    DestinationIsFile(PathBuf),
    #[error("Failed to create destination directory {}: {source}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Everything a run needs, resolved and validated up front.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub path: PathBuf,
    pub prefix: String,
    pub hint: Option<FormatHint>,
    /// Destination directory when copy mode is on.
    pub dest: Option<PathBuf>,
    /// Whether files are also renamed in place.
    pub rename: bool,
}

/// Initializes the logger from the verbosity count.
///
/// Without `-v`, `RUST_LOG` decides and defaults to warnings only.
pub fn init_logging(verbose: u8) {
    let mut builder = if verbose == 0 {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    } else {
        let level = match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        builder
    };
    builder.format_timestamp(None).init();
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Resolves the arguments and config file into [`RunOptions`].
///
/// All fatal checks happen here, before any file is touched. In copy mode
/// the destination directory is created if it does not exist.
pub fn resolve(args: &Args) -> Result<RunOptions, CliError> {
    let path = expand_home(&args.path);
    if !path.exists() {
        return Err(CliError::PathNotFound(path));
    }

    let defaults = config::load(&path, args.config.as_deref())?;
    let settings = Settings::new(args.overrides(), defaults);

    let prefix = settings
        .get_str("prefix")?
        .filter(|p| !p.is_empty())
        .ok_or(CliError::MissingPrefix)?
        .to_string();

    let hint = FormatHint::parse_optional(settings.get_str("format")?)?;
    let force = settings.get_bool("force")?.unwrap_or(false);
    let copy_mode = settings.get_bool("copy")?.unwrap_or(false) || args.dest.is_some();

    let dest = if copy_mode {
        let dest = settings
            .get_str("dest")?
            .ok_or(CliError::MissingDestination)?;
        Some(prepare_destination(&expand_home(Path::new(dest)))?)
    } else {
        None
    };

    Ok(RunOptions {
        rename: dest.is_none() || force,
        path,
        prefix,
        hint,
        dest,
    })
}

/// Creates `dest` if needed and checks that it is a directory.
fn prepare_destination(dest: &Path) -> Result<PathBuf, CliError> {
    if !dest.exists() {
        debug!("Creating destination directory {}", dest.display());
        fs::create_dir_all(dest).map_err(|e| CliError::CreateDestination {
            path: dest.to_path_buf(),
            source: e,
        })?;
    } else if !dest.is_dir() {
        return Err(CliError::DestinationIsFile(dest.to_path_buf()));
    }
    Ok(dest.to_path_buf())
}

/// Runs mrename with parsed arguments.
///
/// Copy (if enabled) runs before rename so that copies are taken from the
/// original names.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use mrename::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["mrename", "scans", "-p", "page"]);
/// if let Err(e) = run_cli(args) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(args: Args) -> Result<(), CliError> {
    let options = resolve(&args)?;
    debug!("Resolved options: {:?}", options);

    if let Some(dest) = &options.dest {
        let report = copy_with_progress(&options, dest)?;
        OutputFormatter::report(Action::Copy, &report);
    }

    if options.rename {
        let report = rename_with_progress(&options)?;
        OutputFormatter::report(Action::Rename, &report);
    }

    Ok(())
}

fn rename_with_progress(options: &RunOptions) -> Result<Report, TransferError> {
    let RunOptions {
        path, prefix, hint, ..
    } = options;
    if !path.is_dir() {
        return transfer::rename(path, prefix, hint.as_ref());
    }

    let candidates = list_candidates(path)?;
    let pb = OutputFormatter::create_progress_bar(candidates.len() as u64);
    let counts =
        transfer::rename_candidates(&candidates, prefix, hint.as_ref(), progress_observer(&pb))?;
    pb.finish_and_clear();

    Ok(Report::Bulk(counts))
}

fn copy_with_progress(options: &RunOptions, dest: &Path) -> Result<Report, TransferError> {
    let RunOptions {
        path, prefix, hint, ..
    } = options;
    if !path.is_dir() {
        return transfer::copy(path, dest, prefix, hint.as_ref());
    }

    let candidates = list_candidates(path)?;
    let pb = OutputFormatter::create_progress_bar(candidates.len() as u64);
    let counts = transfer::copy_candidates(
        &candidates,
        dest,
        prefix,
        hint.as_ref(),
        progress_observer(&pb),
    )?;
    pb.finish_and_clear();

    Ok(Report::Bulk(counts))
}

/// Advances `pb` by one for every processed file.
fn progress_observer(pb: &ProgressBar) -> impl FnMut(&Path, Outcome) + '_ {
    move |file, outcome| {
        trace_outcome(file, outcome);
        pb.inc(1);
    }
}

fn trace_outcome(file: &Path, outcome: Outcome) {
    trace!("{}: {}", file.display(), outcome.describe());
}
