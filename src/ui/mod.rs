//! Ratatui front-end for the library tracker: a sidebar menu of five pages
//! and the page bodies that call into the store.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use screens::Page;
pub use terminal::run_app;
