use std::fs;

use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::Error;
use crate::models::{non_blank, Place, PlaceFields};
use crate::rating::RatingControl;

use super::helpers::star_spans;

/// Internal representation of the place form fields. Used for both the
/// "new place" flow and editing, where it starts as a copy of the record.
#[derive(Clone)]
pub(crate) struct PlaceForm {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) category: String,
    /// Path of a new photo to attach. Read when the form is saved.
    pub(crate) photo_path: String,
    /// Photo already stored on the place being edited.
    pub(crate) existing_photo: Option<Vec<u8>>,
    pub(crate) rating: RatingControl,
    pub(crate) active: PlaceField,
    pub(crate) error: Option<String>,
}

/// Fields available within the place form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum PlaceField {
    #[default]
    Name,
    Location,
    Category,
    Photo,
    Rating,
}

impl PlaceField {
    pub(crate) const ALL: [PlaceField; 5] = [
        PlaceField::Name,
        PlaceField::Location,
        PlaceField::Category,
        PlaceField::Photo,
        PlaceField::Rating,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            PlaceField::Name => "Name",
            PlaceField::Location => "Location",
            PlaceField::Category => "Category",
            PlaceField::Photo => "Photo",
            PlaceField::Rating => "Rating",
        }
    }

    fn next(self) -> Self {
        match self {
            PlaceField::Name => PlaceField::Location,
            PlaceField::Location => PlaceField::Category,
            PlaceField::Category => PlaceField::Photo,
            PlaceField::Photo => PlaceField::Rating,
            PlaceField::Rating => PlaceField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            PlaceField::Name => PlaceField::Rating,
            PlaceField::Location => PlaceField::Name,
            PlaceField::Category => PlaceField::Location,
            PlaceField::Photo => PlaceField::Category,
            PlaceField::Rating => PlaceField::Photo,
        }
    }
}

impl PlaceForm {
    /// Blank form whose rating control has `star_count` stars.
    pub(crate) fn new(star_count: u32) -> Result<Self> {
        Ok(Self {
            name: String::new(),
            location: String::new(),
            category: String::new(),
            photo_path: String::new(),
            existing_photo: None,
            rating: RatingControl::new(star_count)?,
            active: PlaceField::Name,
            error: None,
        })
    }

    /// Populate the form from an existing place when editing.
    pub(crate) fn from_place(place: &Place, star_count: u32) -> Result<Self> {
        let mut form = Self::new(star_count)?;
        form.name = place.name.clone();
        form.location = place.location_text().to_string();
        form.category = place.category_text().to_string();
        form.existing_photo = place.image_data.clone().filter(|bytes| !bytes.is_empty());
        form.rating
            .set_rating(place.rating.min(star_count))
            .context("stored rating does not fit the rating control")?;
        Ok(form)
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Insert a character into the active field. On the rating field digits
    /// tap the matching star and `0` clears the rating.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            PlaceField::Name => self.name.push(ch),
            PlaceField::Location => self.location.push(ch),
            PlaceField::Category => self.category.push(ch),
            PlaceField::Photo => self.photo_path.push(ch),
            PlaceField::Rating => {
                let Some(position) = ch.to_digit(10) else {
                    return false;
                };
                let outcome = if position == 0 {
                    self.rating.set_rating(0)
                } else {
                    self.rating.tap(position).map(|_| ())
                };
                if let Err(err) = outcome {
                    self.error = Some(format!("Rating {err}"));
                    return false;
                }
            }
        }
        true
    }

    /// Remove the last character from the active field, or clear the rating.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            PlaceField::Name => {
                self.name.pop();
            }
            PlaceField::Location => {
                self.location.pop();
            }
            PlaceField::Category => {
                self.category.pop();
            }
            PlaceField::Photo => {
                self.photo_path.pop();
            }
            PlaceField::Rating => {
                // Zero is always within bounds.
                let _ = self.rating.set_rating(0);
            }
        }
    }

    /// Drop the stored photo and any pending path. Returns whether anything
    /// was cleared.
    pub(crate) fn clear_photo(&mut self) -> bool {
        if self.active != PlaceField::Photo {
            return false;
        }
        let had_photo = self.existing_photo.is_some() || !self.photo_path.is_empty();
        self.existing_photo = None;
        self.photo_path.clear();
        had_photo
    }

    /// Validate and normalize form inputs before they are written to the
    /// store. A non-empty photo path is read from disk here.
    pub(crate) fn parse_inputs(&self) -> Result<PlaceFields> {
        let image_data = match non_blank(&self.photo_path) {
            Some(path) => Some(
                fs::read(&path).map_err(|err| anyhow!("Could not read photo {path}: {err}"))?,
            ),
            None => self.existing_photo.clone(),
        };

        let fields = PlaceFields {
            name: self.name.trim().to_string(),
            location: non_blank(&self.location),
            category: non_blank(&self.category),
            image_data,
            rating: self.rating.rating(),
        };
        fields
            .validate(self.rating.star_count())
            .map_err(|err| match err {
                Error::InvalidArgument(_) => anyhow!("Place name is required."),
                other => other.into(),
            })?;
        Ok(fields)
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field: PlaceField) -> Line<'static> {
        let is_active = self.active == field;
        let mut spans = vec![Span::raw(format!("{}: ", field.label()))];

        if field == PlaceField::Rating {
            spans.extend(star_spans(&self.rating, is_active));
            spans.push(Span::styled(
                format!("  {}/{}", self.rating.rating(), self.rating.star_count()),
                Style::default().fg(Color::DarkGray),
            ));
            return Line::from(spans);
        }

        let value = self.value(field);
        let display = if !value.is_empty() {
            value.to_string()
        } else {
            match field {
                PlaceField::Name => "<required>".to_string(),
                PlaceField::Photo if self.existing_photo.is_some() => {
                    "<keep current photo>".to_string()
                }
                PlaceField::Photo => "<optional file path>".to_string(),
                _ => "<optional>".to_string(),
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        spans.push(Span::styled(display, style));
        Line::from(spans)
    }

    fn value(&self, field: PlaceField) -> &str {
        match field {
            PlaceField::Name => &self.name,
            PlaceField::Location => &self.location,
            PlaceField::Category => &self.category,
            PlaceField::Photo => &self.photo_path,
            PlaceField::Rating => "",
        }
    }

    /// Character length of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: PlaceField) -> usize {
        self.value(field).chars().count()
    }
}

/// State for confirming a place deletion.
#[derive(Clone)]
pub(crate) struct ConfirmPlaceDelete {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl ConfirmPlaceDelete {
    pub(crate) fn from(place: &Place) -> Self {
        Self {
            id: place.id,
            name: place.name.clone(),
        }
    }
}
