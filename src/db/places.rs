use anyhow::{anyhow, Context, Result};
use chrono::{TimeDelta, Utc};
use rusqlite::{params, Connection, Row};

use crate::error::Error;
use crate::models::{Place, PlaceFields};
use crate::rating::MAX_STAR_COUNT;

/// Sample restaurants offered to a brand new catalog.
const DEMO_PLACE_NAMES: &[&str] = &[
    "Burger Heroes",
    "Kitchen",
    "Bonsai",
    "Дастархан",
    "Индокитай",
    "X.O",
    "Балкан Гриль",
    "Sherlock Holmes",
    "Speak Easy",
    "Morris Pub",
    "Вкусные истории",
    "Классик",
    "Love&Life",
    "Шок",
    "Бочка",
];

const DEMO_LOCATION: &str = "Moscow";
const DEMO_CATEGORY: &str = "Restaurant";

const PLACE_COLUMNS: &str = "id, name, location, category, image, rating, created_at";

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        category: row.get(3)?,
        image_data: row.get(4)?,
        rating: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Retrieve every place. The catalog applies its own ordering, so the query
/// only orders by id to keep reads reproducible.
pub fn fetch_places(conn: &Connection) -> Result<Vec<Place>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {PLACE_COLUMNS} FROM places ORDER BY id"))
        .context("failed to prepare place query")?;

    let places = stmt
        .query_map([], place_from_row)
        .context("failed to load places")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect places")?;

    Ok(places)
}

/// Fetch a single place by id.
pub fn fetch_place(conn: &Connection, id: i64) -> Result<Place> {
    conn.query_row(
        &format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1"),
        params![id],
        place_from_row,
    )
    .map_err(|err| match err {
        rusqlite::Error::QueryReturnedNoRows => anyhow!("Place not found"),
        other => other.into(),
    })
    .context("failed to load place")
}

pub fn count_places(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM places", [], |row| row.get(0))
        .context("failed to count places")?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Only the absolute star cap is enforced here. Callers holding a configured
/// star count run `PlaceFields::validate` with it before saving.
fn check_rating(fields: &PlaceFields) -> Result<()> {
    if fields.rating > MAX_STAR_COUNT {
        return Err(Error::OutOfRange {
            value: fields.rating,
            min: 0,
            max: MAX_STAR_COUNT,
        }
        .into());
    }
    Ok(())
}

/// Insert a new place stamped with the current time, returning the hydrated
/// struct so the caller can log or focus it.
pub fn create_place(conn: &Connection, fields: &PlaceFields) -> Result<Place> {
    check_rating(fields)?;
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO places (name, location, category, image, rating, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            fields.name,
            fields.location,
            fields.category,
            fields.image_data,
            fields.rating,
            created_at,
        ],
    )
    .context("failed to insert place")?;

    let id = conn.last_insert_rowid();
    log::info!("Created place {id} ({})", fields.name);
    Ok(Place {
        id,
        name: fields.name.clone(),
        location: fields.location.clone(),
        category: fields.category.clone(),
        image_data: fields.image_data.clone(),
        rating: fields.rating,
        created_at,
    })
}

/// Rewrite every editable field. `created_at` is left alone.
pub fn update_place(conn: &Connection, id: i64, fields: &PlaceFields) -> Result<()> {
    check_rating(fields)?;
    let updated = conn
        .execute(
            "UPDATE places
             SET name = ?1, location = ?2, category = ?3, image = ?4, rating = ?5
             WHERE id = ?6",
            params![
                fields.name,
                fields.location,
                fields.category,
                fields.image_data,
                fields.rating,
                id,
            ],
        )
        .context("failed to update place")?;

    if updated == 0 {
        Err(anyhow!("Place not found"))
    } else {
        log::info!("Updated place {id} ({})", fields.name);
        Ok(())
    }
}

pub fn delete_place(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM places WHERE id = ?1", params![id])
        .context("failed to delete place")?;

    if deleted == 0 {
        Err(anyhow!("Place not found"))
    } else {
        log::info!("Deleted place {id}");
        Ok(())
    }
}

/// Insert the demo restaurants when the table is empty. Creation times are
/// spaced a millisecond apart so date ordering follows the list. Returns the
/// number of rows inserted.
pub fn seed_demo_places(conn: &Connection) -> Result<usize> {
    if count_places(conn)? > 0 {
        return Ok(0);
    }

    let base = Utc::now();
    let tx = conn
        .unchecked_transaction()
        .context("failed to start seed transaction")?;
    for (offset, name) in DEMO_PLACE_NAMES.iter().enumerate() {
        let created_at = base + TimeDelta::milliseconds(offset as i64);
        tx.execute(
            "INSERT INTO places (name, location, category, rating, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![name, DEMO_LOCATION, DEMO_CATEGORY, created_at],
        )
        .with_context(|| format!("failed to seed place {name}"))?;
    }
    tx.commit().context("failed to commit seed transaction")?;

    log::info!("Seeded {} demo places", DEMO_PLACE_NAMES.len());
    Ok(DEMO_PLACE_NAMES.len())
}
