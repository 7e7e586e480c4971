//! In-memory view state over the place list: which places are visible and in
//! what order. The catalog never talks to the store. Callers fetch from the
//! store and hand the result to [`Catalog::load`] after every write.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::Place;

/// Keys the place list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreationDate,
    Name,
}

impl SortKey {
    /// Segment order used by the sort selector.
    pub const SEGMENTS: [SortKey; 2] = [SortKey::CreationDate, SortKey::Name];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::CreationDate => "Date",
            SortKey::Name => "Name",
        }
    }

    /// Position of this key in [`SortKey::SEGMENTS`].
    pub fn segment(self) -> usize {
        match self {
            SortKey::CreationDate => 0,
            SortKey::Name => 1,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<usize> for SortKey {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Self::SEGMENTS
            .get(index)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("unknown sort segment {index}")))
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" | "created" | "creation-date" => Ok(SortKey::CreationDate),
            "name" => Ok(SortKey::Name),
            _ => Err(Error::InvalidArgument(format!("unknown sort key '{value}'"))),
        }
    }
}

/// Working set of places plus the ordering and search predicate applied to
/// it. `visible` is recomputed eagerly on every transition and holds indices
/// into `places`.
#[derive(Debug, Clone)]
pub struct Catalog {
    places: Vec<Place>,
    visible: Vec<usize>,
    sort_key: SortKey,
    ascending: bool,
    search_text: String,
    changed: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_order(SortKey::default(), true)
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty catalog with an initial ordering.
    pub fn with_order(sort_key: SortKey, ascending: bool) -> Self {
        Self {
            places: Vec::new(),
            visible: Vec::new(),
            sort_key,
            ascending,
            search_text: String::new(),
            changed: false,
        }
    }

    /// Replace the working set with a freshly fetched store snapshot.
    pub fn load<I>(&mut self, places: I)
    where
        I: IntoIterator<Item = Place>,
    {
        self.places = places.into_iter().collect();
        self.refresh();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.refresh();
    }

    /// Select the sort key by segment index. Unknown indices leave the state
    /// untouched and report `InvalidArgument`.
    pub fn select_sort_segment(&mut self, index: usize) -> Result<()> {
        let key = SortKey::try_from(index)?;
        self.set_sort_key(key);
        Ok(())
    }

    /// Flip the sort direction and return the new `ascending` flag.
    pub fn toggle_direction(&mut self) -> bool {
        self.ascending = !self.ascending;
        self.refresh();
        self.ascending
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.refresh();
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Whether a search predicate is narrowing the working set.
    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty()
    }

    /// Visible places in display order.
    pub fn visible(&self) -> impl ExactSizeIterator<Item = &Place> + '_ {
        self.visible.iter().map(move |&idx| &self.places[idx])
    }

    /// Place shown at a visible row.
    pub fn get(&self, index: usize) -> Option<&Place> {
        self.visible.get(index).map(|&idx| &self.places[idx])
    }

    /// Id of the place shown at a visible row, so positional deletes map to
    /// exactly one record.
    pub fn id_at(&self, index: usize) -> Option<i64> {
        self.get(index).map(|place| place.id)
    }

    /// Visible row currently showing `id`.
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.visible().position(|place| place.id == id)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Size of the working set, ignoring the search predicate.
    pub fn total_count(&self) -> usize {
        self.places.len()
    }

    /// Drop a place from the working set. The store is not touched: callers
    /// delete from the store first, then remove here.
    pub fn remove(&mut self, id: i64) -> Option<Place> {
        let idx = self.places.iter().position(|place| place.id == id)?;
        let removed = self.places.remove(idx);
        self.refresh();
        Some(removed)
    }

    /// Consume the "changed" signal raised by the last transitions.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn refresh(&mut self) {
        let needle = self.search_text.to_lowercase();
        let mut visible: Vec<usize> = self
            .places
            .iter()
            .enumerate()
            .filter(|(_, place)| matches_search(place, &needle))
            .map(|(idx, _)| idx)
            .collect();

        visible.sort_by(|&a, &b| self.compare(&self.places[a], &self.places[b]));

        log::debug!(
            "catalog recomputed: {} of {} places visible (sort={}, ascending={}, search={:?})",
            visible.len(),
            self.places.len(),
            self.sort_key,
            self.ascending,
            self.search_text
        );

        self.visible = visible;
        self.changed = true;
    }

    /// Order two places under the current key and direction. Name order is
    /// case-insensitive first and exact text second, so names differing only
    /// in case ("Cafe", "cafe") are ordered by text and never reach the id
    /// tie-break. Places with equal primary keys always end with id ascending,
    /// in both directions.
    fn compare(&self, a: &Place, b: &Place) -> Ordering {
        let primary = match self.sort_key {
            SortKey::CreationDate => a.created_at.cmp(&b.created_at),
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        };
        let primary = if self.ascending {
            primary
        } else {
            primary.reverse()
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Case-insensitive substring match on name or location. `needle` must
/// already be lowercase; an empty needle matches everything.
fn matches_search(place: &Place, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    place.name.to_lowercase().contains(needle)
        || place
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(needle))
}
