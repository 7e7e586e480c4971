//! Persistence module split across logical submodules.

mod connection;
mod places;
mod store;

pub use connection::{ensure_schema, open_in_memory};
pub use places::{
    count_places, create_place, delete_place, fetch_place, fetch_places, seed_demo_places,
    update_place,
};
pub use store::SqliteStore;
