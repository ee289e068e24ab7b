//! Run settings.
//!
//! Read from an optional `eclat.{toml,json,yaml,...}` file in the working
//! directory, overridden by `ECLAT_*` environment variables where nested keys
//! are separated by a double underscore, e.g.
//! `ECLAT_CONSTRAINTS__MIN_SUPPORT=20`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constraint::Constraints;
use crate::error::Result;
use crate::ingest::{DEFAULT_DATE_FORMAT, Encoding, LogOptions};

pub const SETTINGS_FILE: &str = "eclat";
pub const ENV_PREFIX: &str = "ECLAT";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Purchase log to mine.
    pub input: PathBuf,
    /// Folder the result tables are written to.
    pub results: PathBuf,
    pub has_headers: bool,
    pub date_format: String,
    /// `latin1` or `utf8`.
    pub encoding: Encoding,
    pub constraints: Constraints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("grocery_data.csv"),
            results: PathBuf::from("results"),
            has_headers: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            encoding: Encoding::default(),
            constraints: Constraints::default(),
        }
    }
}

impl Settings {
    /// Settings from `eclat.*` in the working directory and the environment.
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(SETTINGS_FILE).required(false))
    }
    /// Settings from the given file and the environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(File::from(path.as_ref()).required(true))
    }
    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            has_headers: self.has_headers,
            date_format: self.date_format.clone(),
            encoding: self.encoding,
        }
    }
}
