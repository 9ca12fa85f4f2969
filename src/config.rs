//! Per-directory configuration and option merging.
//!
//! A directory can carry a `.mrename.json` file holding default values for
//! the command-line options. Anything given on the command line takes
//! precedence over the file.
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!     "prefix": "page",
//!     "format": "scan_{}.jpg",
//!     "copy": true,
//!     "dest": "~/Pictures/sorted",
//!     "force": false
//! }
//! ```
//!
//! Unknown keys are ignored.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory configuration file.
pub const CONFIG_FILE: &str = ".mrename.json";

/// Errors that can occur while loading or reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("Failed to decode the config file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The file is valid JSON but not an object.
    #[error("Config file {} must contain a JSON object", .0.display())]
    NotAnObject(PathBuf),
    /// An option has the wrong JSON type.
    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Options as a JSON object, keyed by long option name.
pub type Options = Map<String, Value>;

/// Returns the value of `key`: the override if present and not `null`,
/// otherwise the default if present and not `null`, otherwise `None`.
///
/// # Examples
///
/// ```
/// use mrename::config::{Options, resolve_option};
/// use serde_json::json;
///
/// let cli: Options = json!({ "prefix": "a", "format": null }).as_object().unwrap().clone();
/// let file: Options = json!({ "prefix": "b", "format": "x{}" }).as_object().unwrap().clone();
///
/// assert_eq!(resolve_option(&cli, &file, "prefix"), Some(&json!("a")));
/// assert_eq!(resolve_option(&cli, &file, "format"), Some(&json!("x{}")));
/// assert_eq!(resolve_option(&cli, &file, "dest"), None);
/// ```
pub fn resolve_option<'a>(overrides: &'a Options, defaults: &'a Options, key: &str) -> Option<&'a Value> {
    let present = |map: &'a Options| map.get(key).filter(|v| !v.is_null());
    present(overrides).or_else(|| present(defaults))
}

/// Resolved configuration layers.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    overrides: Options,
    defaults: Options,
}

impl Settings {
    /// Layers command-line `overrides` over file `defaults`.
    pub fn new(overrides: Options, defaults: Options) -> Self {
        Self {
            overrides,
            defaults,
        }
    }

    /// Raw merged value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        resolve_option(&self.overrides, &self.defaults, key)
    }

    /// Merged value of `key` as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the value is not a string.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        self.get(key)
            .map(|v| {
                v.as_str().ok_or_else(|| ConfigError::InvalidValue {
                    key: key.to_string(),
                    expected: "a string",
                })
            })
            .transpose()
    }

    /// Merged value of `key` as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the value is not a boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get(key)
            .map(|v| {
                v.as_bool().ok_or_else(|| ConfigError::InvalidValue {
                    key: key.to_string(),
                    expected: "a boolean",
                })
            })
            .transpose()
    }
}

/// Loads the configuration defaults.
///
/// 1. If `config_path` is given, that file must exist and is loaded.
/// 2. Otherwise, if `target` is a directory containing [`CONFIG_FILE`], it is loaded.
/// 3. Otherwise the defaults are empty.
///
/// # Errors
///
/// Returns an error if a file is found but cannot be read or decoded.
pub fn load(target: &Path, config_path: Option<&Path>) -> Result<Options, ConfigError> {
    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return load_from_file(path);
    }

    if !target.is_dir() {
        return Ok(Options::new());
    }

    let local = target.join(CONFIG_FILE);
    if local.is_file() {
        load_from_file(&local)
    } else {
        Ok(Options::new())
    }
}

/// Reads and decodes a JSON configuration file.
fn load_from_file(path: &Path) -> Result<Options, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
    }
}
