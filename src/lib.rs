//! Core library surface for the My Places catalog.
//!
//! The catalog and rating control are plain in-memory state machines; the
//! store, configuration, logging and terminal front-end are the collaborators
//! wired around them by `main.rs`.
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod rating;
pub mod store;
pub mod ui;

pub use catalog::{Catalog, SortKey};
pub use config::Config;
pub use db::SqliteStore;
pub use error::Error;
pub use models::{Place, PlaceFields};
pub use rating::RatingControl;
pub use store::PlaceStore;
pub use ui::{run_app, App};
