//! Domain models that mirror the SQLite schema and get passed throughout the
//! application. They stay light-weight data holders: ordering and filtering
//! live in the catalog, persistence in `db`.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
/// A user-curated point of interest.
pub struct Place {
    /// Primary key assigned by the store. Edit and delete flows correlate on
    /// it, so it never changes after creation.
    pub id: i64,
    /// Display name, never empty.
    pub name: String,
    /// Free-text address.
    pub location: Option<String>,
    /// Free-text label such as "Restaurant" or "Bar".
    pub category: Option<String>,
    /// Raw photo bytes. `None` means the placeholder is shown instead.
    pub image_data: Option<Vec<u8>>,
    /// Star rating between zero and the configured star count.
    pub rating: u32,
    /// Set once by the store; one of the two catalog sort keys.
    pub created_at: DateTime<Utc>,
}

impl Place {
    /// Location text or an empty string, for list rows and search.
    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// Category text or an empty string.
    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn has_photo(&self) -> bool {
        self.image_data.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The editable subset of a [`Place`]. Used both to create a place and to
/// rewrite an existing one; `id` and `created_at` are owned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFields {
    pub name: String,
    pub location: Option<String>,
    pub category: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub rating: u32,
}

impl PlaceFields {
    /// Fields for a fresh place with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Copy the editable fields of an existing place for the edit flow.
    pub fn from_place(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            location: place.location.clone(),
            category: place.category.clone(),
            image_data: place.image_data.clone(),
            rating: place.rating,
        }
    }

    /// Check the invariants a stored place must satisfy.
    pub fn validate(&self, max_stars: u32) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidArgument("place name is required".to_string()));
        }
        if self.rating > max_stars {
            return Err(Error::OutOfRange {
                value: self.rating,
                min: 0,
                max: max_stars,
            });
        }
        Ok(())
    }
}

/// Turn blank optional text into `None` and trim everything else.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_place() -> Place {
        Place {
            id: 7,
            name: "Bonsai".to_string(),
            location: Some("Moscow".to_string()),
            category: None,
            image_data: Some(vec![0xff, 0xd8]),
            rating: 4,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_place_copies_editable_fields() {
        let place = sample_place();
        let fields = PlaceFields::from_place(&place);
        assert_eq!(fields.name, "Bonsai");
        assert_eq!(fields.location.as_deref(), Some("Moscow"));
        assert_eq!(fields.image_data, Some(vec![0xff, 0xd8]));
        assert_eq!(fields.rating, 4);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let fields = PlaceFields::named("   ");
        assert!(matches!(
            fields.validate(5),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rating_bounds() {
        let mut fields = PlaceFields::named("Kitchen");
        fields.rating = 5;
        assert!(fields.validate(5).is_ok());
        fields.rating = 6;
        assert_eq!(
            fields.validate(5),
            Err(Error::OutOfRange {
                value: 6,
                min: 0,
                max: 5
            })
        );
    }

    #[test]
    fn test_optional_text_helpers() {
        let mut place = sample_place();
        assert_eq!(place.location_text(), "Moscow");
        assert_eq!(place.category_text(), "");
        assert!(place.has_photo());
        place.image_data = Some(Vec::new());
        assert!(!place.has_photo());
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" Bar ").as_deref(), Some("Bar"));
    }
}
