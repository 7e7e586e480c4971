//! Ratatui front-end: a single place list with modal dialogs for searching,
//! editing and deleting. All list state lives in the catalog; this layer only
//! routes key presses and draws.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
