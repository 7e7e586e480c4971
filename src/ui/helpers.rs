use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::catalog::Catalog;
use crate::models::Place;
use crate::rating::RatingControl;

const FILLED_STAR: &str = "★";
const EMPTY_STAR: &str = "☆";
/// Shown in place of a thumbnail when a place has no photo.
const PHOTO_PLACEHOLDER: &str = "[no photo]";
const PHOTO_MARKER: &str = "[photo]";

/// Render a rating control as one span per star.
pub(crate) fn star_spans(control: &RatingControl, highlighted: bool) -> Vec<Span<'static>> {
    let filled_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let empty_style = Style::default().fg(Color::DarkGray);

    control
        .stars()
        .map(|filled| {
            if filled {
                Span::styled(FILLED_STAR, filled_style)
            } else {
                Span::styled(EMPTY_STAR, empty_style)
            }
        })
        .collect()
}

/// Plain-text star row, e.g. `★★★☆☆`.
pub(crate) fn star_text(control: &RatingControl) -> String {
    control
        .stars()
        .map(|filled| if filled { FILLED_STAR } else { EMPTY_STAR })
        .collect()
}

/// Display-only rating for a stored place. Ratings above `star_count` are
/// shown as full.
pub(crate) fn display_rating(rating: u32, star_count: u32) -> RatingControl {
    let mut control = RatingControl::new(star_count).unwrap_or_default();
    let capped = rating.min(control.star_count());
    // `capped` never exceeds the star count.
    let _ = control.set_rating(capped);
    control
}

/// Two-line row for the place list: name with stars, then the details.
pub(crate) fn place_lines(place: &Place, star_count: u32, selected: bool) -> Vec<Line<'static>> {
    let name_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let rating = display_rating(place.rating, star_count);

    let mut header = vec![Span::styled(place.name.clone(), name_style), Span::raw("  ")];
    header.extend(star_spans(&rating, selected));

    let mut details = Vec::new();
    for part in [place.location_text(), place.category_text()] {
        if !part.is_empty() {
            details.push(part.to_string());
        }
    }
    details.push(
        if place.has_photo() {
            PHOTO_MARKER
        } else {
            PHOTO_PLACEHOLDER
        }
        .to_string(),
    );

    vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("  {}", details.join(" • ")),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Block title describing the current ordering and search.
pub(crate) fn catalog_title(catalog: &Catalog) -> String {
    let arrow = if catalog.is_ascending() { "▲" } else { "▼" };
    let mut title = format!(
        "My Places • {} of {} • Sort: {} {}",
        catalog.len(),
        catalog.total_count(),
        catalog.sort_key(),
        arrow
    );
    if catalog.is_filtering() {
        title.push_str(&format!(" • Search: \"{}\"", catalog.search_text()));
    }
    title
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Cell `column` characters right of and `row` lines below the top-left of
/// `inner`, kept inside the area so long input never pushes the cursor off it.
pub(crate) fn cursor_in(inner: Rect, column: usize, row: usize) -> (u16, u16) {
    let offset = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let x = inner
        .x
        .saturating_add(offset(column))
        .min(inner.right().saturating_sub(1))
        .max(inner.x);
    let y = inner
        .y
        .saturating_add(offset(row))
        .min(inner.bottom().saturating_sub(1))
        .max(inner.y);
    (x, y)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;
    use anyhow::{anyhow, Context};
    use chrono::Utc;

    fn place(name: &str, rating: u32, photo: bool) -> Place {
        Place {
            id: 1,
            name: name.to_string(),
            location: Some("Moscow".to_string()),
            category: Some("Restaurant".to_string()),
            image_data: photo.then(|| vec![1]),
            rating,
            created_at: Utc::now(),
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_star_text_matches_rating() {
        let control = display_rating(2, 5);
        assert_eq!(star_text(&control), "★★☆☆☆");
        assert_eq!(star_text(&display_rating(9, 3)), "★★★");
    }

    #[test]
    fn test_place_lines_show_placeholder_without_photo() {
        let lines = place_lines(&place("Bonsai", 3, false), 5, false);
        assert_eq!(line_text(&lines[0]), "Bonsai  ★★★☆☆");
        assert_eq!(line_text(&lines[1]), "  Moscow • Restaurant • [no photo]");

        let with_photo = place_lines(&place("Bonsai", 0, true), 5, true);
        assert!(line_text(&with_photo[1]).ends_with("[photo]"));
    }

    #[test]
    fn test_catalog_title_reflects_state() {
        let mut catalog = Catalog::with_order(SortKey::Name, false);
        catalog.load(vec![place("Kitchen", 0, false)]);
        assert_eq!(catalog_title(&catalog), "My Places • 1 of 1 • Sort: Name ▼");

        catalog.set_search_text("zz");
        assert_eq!(
            catalog_title(&catalog),
            "My Places • 0 of 1 • Sort: Name ▼ • Search: \"zz\""
        );
    }

    #[test]
    fn test_surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("Place not found"))
            .context("failed to update place")
            .unwrap_err();
        assert_eq!(surface_error(&err), "Place not found");
    }

    #[test]
    fn test_cursor_stays_inside_area() {
        let inner = Rect::new(10, 5, 20, 3);
        assert_eq!(cursor_in(inner, 8, 1), (18, 6));
        assert_eq!(cursor_in(inner, 500, 0), (29, 5));
        assert_eq!(cursor_in(inner, usize::MAX, 9), (29, 7));

        let edge = Rect::new(u16::MAX - 4, 0, 4, 1);
        assert_eq!(cursor_in(edge, 70_000, 0), (u16::MAX - 1, 0));
    }
}
