//! Star rating selector: a bounded integer rendered as a row of toggleable
//! stars.

use crate::error::{Error, Result};

/// Number of stars used unless configured otherwise.
pub const DEFAULT_STAR_COUNT: u32 = 5;

/// Largest star count a control accepts. Each star is picked with a single
/// digit key, so the row stops at nine.
pub const MAX_STAR_COUNT: u32 = 9;

/// Rating state behind the star row. Invariant: `rating <= star_count` and
/// `1 <= star_count <= MAX_STAR_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingControl {
    rating: u32,
    star_count: u32,
}

impl Default for RatingControl {
    fn default() -> Self {
        Self {
            rating: 0,
            star_count: DEFAULT_STAR_COUNT,
        }
    }
}

impl RatingControl {
    /// Unrated control with `star_count` stars.
    pub fn new(star_count: u32) -> Result<Self> {
        let mut control = Self::default();
        control.configure(star_count)?;
        Ok(control)
    }

    /// Change the number of stars, clamping the current rating into range.
    pub fn configure(&mut self, star_count: u32) -> Result<()> {
        if star_count == 0 || star_count > MAX_STAR_COUNT {
            return Err(Error::OutOfRange {
                value: star_count,
                min: 1,
                max: MAX_STAR_COUNT,
            });
        }
        self.star_count = star_count;
        self.rating = self.rating.min(star_count);
        Ok(())
    }

    /// Set the rating directly, e.g. when loading an existing place.
    pub fn set_rating(&mut self, value: u32) -> Result<()> {
        if value > self.star_count {
            return Err(Error::OutOfRange {
                value,
                min: 0,
                max: self.star_count,
            });
        }
        self.rating = value;
        Ok(())
    }

    /// Tap the star at a 1-indexed `position`. Tapping the star that matches
    /// the current rating clears it. Returns the new rating.
    pub fn tap(&mut self, position: u32) -> Result<u32> {
        if position == 0 || position > self.star_count {
            return Err(Error::OutOfRange {
                value: position,
                min: 1,
                max: self.star_count,
            });
        }
        self.rating = if self.rating == position { 0 } else { position };
        Ok(self.rating)
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn star_count(&self) -> u32 {
        self.star_count
    }

    /// Filled state of every star, first to last.
    pub fn stars(&self) -> impl Iterator<Item = bool> + '_ {
        (1..=self.star_count).map(move |position| position <= self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_empty_stars() {
        let control = RatingControl::default();
        assert_eq!(control.rating(), 0);
        assert_eq!(control.star_count(), DEFAULT_STAR_COUNT);
        assert!(control.stars().all(|filled| !filled));
    }

    #[test]
    fn test_tap_toggle_law() {
        let mut control = RatingControl::new(5).unwrap();
        for k in 1..=5 {
            control.set_rating(k).unwrap();
            assert_eq!(control.tap(k), Ok(0));

            for current in 0..=5 {
                if current == k {
                    continue;
                }
                control.set_rating(current).unwrap();
                assert_eq!(control.tap(k), Ok(k));
            }
        }
    }

    #[test]
    fn test_tap_out_of_range() {
        let mut control = RatingControl::new(5).unwrap();
        control.set_rating(3).unwrap();
        assert_eq!(
            control.tap(0),
            Err(Error::OutOfRange {
                value: 0,
                min: 1,
                max: 5
            })
        );
        assert!(control.tap(6).is_err());
        assert_eq!(control.rating(), 3);
    }

    #[test]
    fn test_set_rating_boundaries() {
        let mut control = RatingControl::new(5).unwrap();
        assert!(control.set_rating(0).is_ok());
        assert!(control.set_rating(5).is_ok());
        assert_eq!(
            control.set_rating(6),
            Err(Error::OutOfRange {
                value: 6,
                min: 0,
                max: 5
            })
        );
        assert_eq!(control.rating(), 5);
    }

    #[test]
    fn test_exactly_rating_stars_are_filled() {
        let mut control = RatingControl::new(5).unwrap();
        control.tap(3).unwrap();
        let stars: Vec<bool> = control.stars().collect();
        assert_eq!(stars, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_configure_clamps_rating() {
        let mut control = RatingControl::new(9).unwrap();
        control.set_rating(8).unwrap();
        control.configure(5).unwrap();
        assert_eq!(control.rating(), 5);
        assert_eq!(control.stars().count(), 5);

        control.configure(7).unwrap();
        assert_eq!(control.rating(), 5);
    }

    #[test]
    fn test_configure_rejects_zero_stars() {
        let mut control = RatingControl::default();
        control.set_rating(2).unwrap();
        assert!(control.configure(0).is_err());
        assert_eq!(control.star_count(), 5);
        assert_eq!(control.rating(), 2);
        assert!(RatingControl::new(0).is_err());
    }

    #[test]
    fn test_star_count_is_capped_at_nine() {
        let mut control = RatingControl::new(MAX_STAR_COUNT).unwrap();
        assert_eq!(control.tap(MAX_STAR_COUNT).unwrap(), 9);
        assert!(matches!(
            control.configure(10),
            Err(Error::OutOfRange { value: 10, min: 1, max: 9 })
        ));
        assert_eq!(control.star_count(), 9);
        assert!(RatingControl::new(4_000_000_000).is_err());
    }
}
