//! Contract for durable place storage. The catalog never depends on it; the
//! presentation layer fetches from a store and loads the result into the
//! catalog after every write.

use anyhow::Result;

use crate::models::{Place, PlaceFields};

/// Durable collection of places.
pub trait PlaceStore {
    /// Every stored place. Order is unspecified.
    fn get_all(&self) -> Result<Vec<Place>>;

    /// Persist a new place, returning it with its assigned id and creation
    /// time.
    fn add(&self, fields: &PlaceFields) -> Result<Place>;

    /// Rewrite the editable fields of an existing place.
    fn update(&self, id: i64, fields: &PlaceFields) -> Result<()>;

    /// Permanently remove a place.
    fn delete(&self, id: i64) -> Result<()>;
}
