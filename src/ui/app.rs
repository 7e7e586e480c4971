use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::{Catalog, SortKey};
use crate::rating::RatingControl;
use crate::store::PlaceStore;

use super::forms::{ConfirmPlaceDelete, PlaceField, PlaceForm};
use super::helpers::{
    catalog_title, centered_rect, cursor_in, display_rating, place_lines, star_text,
    surface_error,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp / PageDown.
const PAGE_STEP: isize = 5;

/// Modal state layered over the place list.
enum Mode {
    Normal,
    /// Keystrokes edit the catalog's search text directly.
    Searching,
    AddingPlace(PlaceForm),
    EditingPlace {
        id: i64,
        form: PlaceForm,
    },
    ConfirmPlaceDelete(ConfirmPlaceDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Presentation state: owns the store and the catalog and keeps the
/// selected row in sync with the catalog's visible sequence.
pub struct App {
    store: Box<dyn PlaceStore>,
    catalog: Catalog,
    selected: usize,
    star_count: u32,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app and pull the initial snapshot from the store.
    pub fn new(store: Box<dyn PlaceStore>, catalog: Catalog, star_count: u32) -> Result<Self> {
        RatingControl::new(star_count).context("invalid star count")?;
        let mut app = Self {
            store,
            catalog,
            selected: 0,
            star_count,
            mode: Mode::Normal,
            status: None,
        };
        app.reload(None)?;
        Ok(app)
    }

    /// Process one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching => self.handle_search(code),
            Mode::AddingPlace(form) => self.handle_place_form(code, None, form)?,
            Mode::EditingPlace { id, form } => self.handle_place_form(code, Some(id), form)?,
            Mode::ConfirmPlaceDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        if self.catalog.take_changed() {
            self.ensure_in_bounds();
        }
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.catalog.is_filtering() {
                    self.catalog.set_search_text("");
                    self.set_status("Search cleared.", StatusKind::Info);
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.catalog.len().saturating_sub(1),
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.clear_status();
                return Ok(Mode::Searching);
            }
            KeyCode::Tab => {
                let next = (self.catalog.sort_key().segment() + 1) % SortKey::SEGMENTS.len();
                self.select_sort_segment(next);
            }
            KeyCode::BackTab => {
                let count = SortKey::SEGMENTS.len();
                let previous = (self.catalog.sort_key().segment() + count - 1) % count;
                self.select_sort_segment(previous);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.select_sort_segment(SortKey::CreationDate.segment())
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.select_sort_segment(SortKey::Name.segment())
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let ascending = self.keep_focus(|catalog| catalog.toggle_direction());
                let message = if ascending {
                    "Sorting ascending."
                } else {
                    "Sorting descending."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingPlace(PlaceForm::new(self.star_count)?));
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                if let Some(place) = self.catalog.get(self.selected) {
                    let form = PlaceForm::from_place(place, self.star_count)?;
                    let id = place.id;
                    self.clear_status();
                    return Ok(Mode::EditingPlace { id, form });
                }
                self.set_status("No place selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(place) = self.catalog.get(self.selected) {
                    let confirm = ConfirmPlaceDelete::from(place);
                    self.clear_status();
                    return Ok(Mode::ConfirmPlaceDelete(confirm));
                }
                self.set_status("No place selected to delete.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                self.catalog.set_search_text("");
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Backspace => {
                let mut text = self.catalog.search_text().to_string();
                if text.pop().is_some() {
                    self.catalog.set_search_text(text);
                    self.selected = 0;
                }
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut text = self.catalog.search_text().to_string();
                text.push(ch);
                self.catalog.set_search_text(text);
                self.selected = 0;
            }
            _ => {}
        }
        Mode::Searching
    }

    fn handle_place_form(
        &mut self,
        code: KeyCode,
        id: Option<i64>,
        mut form: PlaceForm,
    ) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let message = if id.is_some() {
                    "Edit cancelled."
                } else {
                    "New place cancelled."
                };
                self.set_status(message, StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Delete => {
                if form.clear_photo() {
                    self.set_status("Photo removed.", StatusKind::Info);
                }
            }
            KeyCode::Enter => match self.save_place(id, &form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    log::warn!("Saving place failed: {err:#}");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        Ok(match (keep_open, id) {
            (false, _) => Mode::Normal,
            (true, Some(id)) => Mode::EditingPlace { id, form },
            (true, None) => Mode::AddingPlace(form),
        })
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmPlaceDelete) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_delete(&confirm) {
                    log::warn!("Deleting place {} failed: {err:#}", confirm.id);
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Delete cancelled.", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmPlaceDelete(confirm),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_place_list(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingPlace(form) => self.draw_place_form(frame, area, "New Place", form),
            Mode::EditingPlace { form, .. } => {
                self.draw_place_form(frame, area, "Edit Place", form)
            }
            Mode::ConfirmPlaceDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching => self.draw_search_bar(frame, content_area),
            Mode::Normal => {}
        }
    }

    fn draw_place_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(catalog_title(&self.catalog));

        if self.catalog.is_empty() {
            let message = if self.catalog.total_count() == 0 {
                "No places yet. Press '+' to add one."
            } else {
                "No places match the current search."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .catalog
            .visible()
            .enumerate()
            .map(|(idx, place)| ListItem::new(place_lines(place, self.star_count, idx == self.selected)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().fg(Color::Cyan));
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let query = self.catalog.search_text();
        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {query}")))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let column = "Search: ".len() + query.chars().count();
        frame.set_cursor_position(cursor_in(inner, column, 0));
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let bindings: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[↑↓]", " Move   "),
                ("[/]", " Search   "),
                ("[Tab]", " Sort key   "),
                ("[r]", " Reverse   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[q]", " Quit"),
            ],
            Mode::Searching => &[
                ("[Type]", " Filter   "),
                ("[Enter]", " Keep   "),
                ("[Esc]", " Clear"),
            ],
            Mode::AddingPlace(_) | Mode::EditingPlace { .. } => &[
                ("[Tab]", " Next field   "),
                ("[1-9]", " Tap star   "),
                ("[Del]", " Remove photo   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmPlaceDelete(_) => &[("[y]", " Delete   "), ("[n]", " Keep")],
        };

        let spans: Vec<Span<'static>> = bindings
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_place_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &PlaceForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = PlaceField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        if form.active != PlaceField::Rating {
            let row = PlaceField::ALL
                .iter()
                .position(|field| *field == form.active)
                .unwrap_or(0);
            let column = form.active.label().len() + 2 + form.value_len(form.active);
            frame.set_cursor_position(cursor_in(inner, column, row));
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmPlaceDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm Delete").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {}?", confirm.name)),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn select_sort_segment(&mut self, index: usize) {
        match self.keep_focus(|catalog| catalog.select_sort_segment(index)) {
            Ok(()) => {
                let message = format!("Sorting by {}.", self.catalog.sort_key());
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    /// Run a catalog transition while keeping the selected place selected.
    fn keep_focus<T>(&mut self, transition: impl FnOnce(&mut Catalog) -> T) -> T {
        let focus = self.catalog.id_at(self.selected);
        let outcome = transition(&mut self.catalog);
        if let Some(position) = focus.and_then(|id| self.catalog.position_of(id)) {
            self.selected = position;
        }
        outcome
    }

    fn save_place(&mut self, id: Option<i64>, form: &PlaceForm) -> Result<()> {
        let fields = form.parse_inputs()?;
        let focus_id = match id {
            Some(id) => {
                self.store.update(id, &fields)?;
                id
            }
            None => self.store.add(&fields)?.id,
        };
        self.reload(Some(focus_id))?;

        let stars = star_text(&display_rating(fields.rating, self.star_count));
        self.set_status(format!("Saved {} {stars}.", fields.name), StatusKind::Info);
        Ok(())
    }

    /// Delete from the store first, then drop the row from the catalog, so a
    /// visible row never points at a deleted record.
    fn perform_delete(&mut self, confirm: &ConfirmPlaceDelete) -> Result<()> {
        self.store.delete(confirm.id)?;
        self.catalog.remove(confirm.id);
        self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
        Ok(())
    }

    /// Pull a fresh snapshot from the store into the catalog.
    fn reload(&mut self, focus_id: Option<i64>) -> Result<()> {
        let places = self.store.get_all()?;
        self.catalog.load(places);

        if let Some(position) = focus_id.and_then(|id| self.catalog.position_of(id)) {
            self.selected = position;
        }
        self.ensure_in_bounds();
        Ok(())
    }

    fn move_selection(&mut self, offset: isize) {
        if self.catalog.is_empty() {
            return;
        }
        let last = self.catalog.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    fn ensure_in_bounds(&mut self) {
        if self.catalog.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.catalog.len() {
            self.selected = self.catalog.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::models::PlaceFields;

    fn app_with(names: &[&str]) -> App {
        app_with_stars(names, 5)
    }

    fn app_with_stars(names: &[&str], star_count: u32) -> App {
        let store = SqliteStore::open_in_memory().unwrap();
        for name in names {
            store.add(&PlaceFields::named(*name)).unwrap();
        }
        App::new(
            Box::new(store),
            Catalog::with_order(SortKey::Name, true),
            star_count,
        )
        .unwrap()
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.catalog.visible().map(|p| p.name.clone()).collect()
    }

    fn selected_name(app: &App) -> Option<String> {
        app.catalog.get(app.selected).map(|p| p.name.clone())
    }

    #[test]
    fn test_initial_load_sorts_store_contents() {
        let app = app_with(&["Kitchen", "Bonsai", "Shock"]);
        assert_eq!(visible_names(&app), vec!["Bonsai", "Kitchen", "Shock"]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(&["Bonsai"]);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn test_reverse_keeps_selected_place() {
        let mut app = app_with(&["Bonsai", "Kitchen", "Shock"]);
        press(&mut app, &[KeyCode::Down]);
        assert_eq!(selected_name(&app).as_deref(), Some("Kitchen"));

        press(&mut app, &[KeyCode::End]);
        press(&mut app, &[KeyCode::Char('r')]);
        assert_eq!(visible_names(&app), vec!["Shock", "Kitchen", "Bonsai"]);
        assert_eq!(selected_name(&app).as_deref(), Some("Shock"));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_tab_cycles_sort_segments() {
        let mut app = app_with(&["Kitchen", "Bonsai"]);
        assert_eq!(app.catalog.sort_key(), SortKey::Name);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.catalog.sort_key(), SortKey::CreationDate);
        assert_eq!(visible_names(&app), vec!["Kitchen", "Bonsai"]);
        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.catalog.sort_key(), SortKey::Name);
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.catalog.sort_key(), SortKey::CreationDate);
    }

    #[test]
    fn test_search_filters_live_and_esc_clears() {
        let mut app = app_with(&["Bonsai", "Kitchen", "Morris Pub"]);
        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "kit");
        assert_eq!(visible_names(&app), vec!["Kitchen"]);

        press(&mut app, &[KeyCode::Backspace, KeyCode::Backspace, KeyCode::Backspace]);
        assert_eq!(visible_names(&app).len(), 3);

        type_text(&mut app, "pub");
        press(&mut app, &[KeyCode::Enter]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(visible_names(&app), vec!["Morris Pub"]);

        // Esc in normal mode clears an active search before quitting.
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert_eq!(visible_names(&app).len(), 3);
    }

    #[test]
    fn test_add_place_through_form() {
        let mut app = app_with(&["Kitchen"]);
        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Bonsai");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "Tverskaya 5");
        press(&mut app, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        type_text(&mut app, "4");
        press(&mut app, &[KeyCode::Enter]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(visible_names(&app), vec!["Bonsai", "Kitchen"]);
        assert_eq!(selected_name(&app).as_deref(), Some("Bonsai"));

        let stored = app.store.get_all().unwrap();
        let bonsai = stored.iter().find(|p| p.name == "Bonsai").unwrap();
        assert_eq!(bonsai.location.as_deref(), Some("Tverskaya 5"));
        assert_eq!(bonsai.rating, 4);
    }

    #[test]
    fn test_top_star_is_reachable_from_keyboard() {
        let mut app = app_with_stars(&[], 9);
        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Bonsai");
        press(&mut app, &[KeyCode::Tab; 4]);
        type_text(&mut app, "9");
        match &app.mode {
            Mode::AddingPlace(form) => {
                assert_eq!(form.active, PlaceField::Rating);
                assert_eq!(form.rating.rating(), 9);
                assert_eq!(form.rating.rating(), form.rating.star_count());
            }
            _ => panic!("expected the add form"),
        }
        press(&mut app, &[KeyCode::Enter]);

        let stored = app.store.get_all().unwrap();
        assert_eq!(stored[0].rating, 9);
    }

    #[test]
    fn test_star_count_beyond_digit_keys_is_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let catalog = Catalog::with_order(SortKey::Name, true);
        assert!(App::new(Box::new(store), catalog, 10).is_err());
    }

    #[test]
    fn test_form_error_keeps_form_open() {
        let mut app = app_with(&[]);
        press(&mut app, &[KeyCode::Char('+'), KeyCode::Enter]);
        match &app.mode {
            Mode::AddingPlace(form) => {
                assert_eq!(form.error.as_deref(), Some("Place name is required."))
            }
            _ => panic!("form should stay open"),
        }
        assert_eq!(app.store.get_all().unwrap().len(), 0);

        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn test_edit_place_updates_store_and_catalog() {
        let mut app = app_with(&["Bonsai", "Kitchen"]);
        press(&mut app, &[KeyCode::Char('e')]);
        for _ in 0.."Bonsai".len() {
            press(&mut app, &[KeyCode::Backspace]);
        }
        type_text(&mut app, "Zen Garden");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(visible_names(&app), vec!["Kitchen", "Zen Garden"]);
        assert_eq!(selected_name(&app).as_deref(), Some("Zen Garden"));
        assert_eq!(app.store.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app_with(&["Bonsai", "Kitchen"]);
        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('n')]);
        assert_eq!(visible_names(&app).len(), 2);

        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('y')]);
        assert_eq!(visible_names(&app), vec!["Kitchen"]);
        assert_eq!(app.store.get_all().unwrap().len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = app_with(&["Bonsai", "Kitchen"]);
        press(&mut app, &[KeyCode::End, KeyCode::Char('-'), KeyCode::Char('y')]);
        assert_eq!(app.selected, 0);
        assert_eq!(selected_name(&app).as_deref(), Some("Bonsai"));
    }

    #[test]
    fn test_actions_on_empty_catalog_report_errors() {
        let mut app = app_with(&[]);
        press(&mut app, &[KeyCode::Char('e')]);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("No place selected to edit.")
        );
        press(&mut app, &[KeyCode::Char('-')]);
        assert!(matches!(app.mode, Mode::Normal));
    }
}
