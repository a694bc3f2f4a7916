//! Binary entry point that glues the JSON-backed book store to the TUI: read
//! the configuration, start logging, make sure the library file exists, and
//! drive the Ratatui event loop until the user exits.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use library_tracker::{run_app, App, BookStore, Config};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;

    let store = BookStore::new(&config.data_file);
    store
        .ensure_initialized()
        .context("failed to prepare library file")?;
    info!(path = %store.path().display(), "starting library tracker");

    let mut app = App::new(store);
    run_app(&mut app)
}

/// Send log output to a file; the terminal belongs to the TUI.
fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
