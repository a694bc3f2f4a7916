//! Core library surface for the Library Tracker TUI application.
//!
//! The `bin` target wires these pieces together; tests and other tooling can
//! reuse the store without touching the terminal front-end.
pub mod config;
pub mod models;
pub mod store;
pub mod ui;

pub use config::Config;

/// The two domain types that other layers manipulate.
pub use models::{Book, LibraryStats};

/// The JSON-file persistence layer.
pub use store::{BookStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App, Page};
