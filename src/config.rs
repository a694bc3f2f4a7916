//! Runtime configuration for the binary: where the library lives, where logs
//! go, and how chatty they are. Everything has a default so a bare launch just
//! works from the user's home directory.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use tracing::Level;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-tracker";
/// JSON file name stored inside the application data directory.
const DATA_FILE_NAME: &str = "books_data.json";
/// Log file written next to the data file.
const LOG_FILE_NAME: &str = "library-tracker.log";

/// Overrides the data file location.
pub const DATA_FILE_ENV: &str = "LIBRARY_TRACKER_DATA";
/// Overrides the maximum log level.
pub const LOG_LEVEL_ENV: &str = "LIBRARY_TRACKER_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let data_override = env::var_os(DATA_FILE_ENV).filter(|value| !value.is_empty());
        let level = env::var(LOG_LEVEL_ENV).ok();

        let home = match data_override {
            Some(_) => None,
            None => Some(home_dir()?),
        };

        Self::resolve(home.as_deref(), data_override, level.as_deref())
    }

    /// Pure resolution step shared by `from_env` and the tests. `home` is only
    /// consulted when no data file override is given.
    pub fn resolve(
        home: Option<&Path>,
        data_override: Option<OsString>,
        level: Option<&str>,
    ) -> Result<Self> {
        let data_file = match data_override {
            Some(path) => PathBuf::from(path),
            None => home
                .ok_or_else(|| anyhow!("could not locate home directory"))?
                .join(DATA_DIR_NAME)
                .join(DATA_FILE_NAME),
        };

        let log_file = data_file.with_file_name(LOG_FILE_NAME);

        let log_level = match level.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw
                .parse::<Level>()
                .with_context(|| format!("{LOG_LEVEL_ENV} has unknown level '{raw}'"))?,
            None => Level::INFO,
        };

        Ok(Self {
            data_file,
            log_file,
            log_level,
        })
    }
}

/// Resolve the user's home directory.
fn home_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().to_path_buf())
}
