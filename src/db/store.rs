use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use super::connection::{ensure_schema, open_in_memory};
use super::places::{create_place, delete_place, fetch_places, seed_demo_places, update_place};
use crate::models::{Place, PlaceFields};
use crate::store::PlaceStore;

/// [`PlaceStore`] backed by the embedded SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self {
            conn: ensure_schema(db_path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }

    /// Insert the demo places if nothing is stored yet.
    pub fn seed_if_empty(&self) -> Result<usize> {
        seed_demo_places(&self.conn)
    }
}

impl PlaceStore for SqliteStore {
    fn get_all(&self) -> Result<Vec<Place>> {
        fetch_places(&self.conn)
    }

    fn add(&self, fields: &PlaceFields) -> Result<Place> {
        create_place(&self.conn, fields)
    }

    fn update(&self, id: i64, fields: &PlaceFields) -> Result<()> {
        update_place(&self.conn, id, fields)
    }

    fn delete(&self, id: i64) -> Result<()> {
        delete_place(&self.conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SortKey};

    #[test]
    fn test_store_feeds_catalog_after_each_write() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut catalog = Catalog::with_order(SortKey::Name, true);

        let kitchen = store.add(&PlaceFields::named("Kitchen")).unwrap();
        let bonsai = store.add(&PlaceFields::named("Bonsai")).unwrap();
        catalog.load(store.get_all().unwrap());
        let names: Vec<&str> = catalog.visible().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bonsai", "Kitchen"]);

        store.delete(bonsai.id).unwrap();
        catalog.remove(bonsai.id);
        assert_eq!(catalog.id_at(0), Some(kitchen.id));
        assert_eq!(catalog.len(), 1);

        catalog.load(store.get_all().unwrap());
        assert_eq!(catalog.id_at(0), Some(kitchen.id));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_file_backed_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("places.sqlite");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            assert_eq!(store.seed_if_empty().unwrap(), 15);
        }

        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(reopened.seed_if_empty().unwrap(), 0);
        assert_eq!(reopened.get_all().unwrap().len(), 15);
    }
}
