//! Gallery grid component
//!
//! Draws the loaded artworks as a responsive grid of cards with a footer
//! that reflects the loader state (spinner, end marker or error banner).
//!
//! The panel also hosts the near-end trigger: whenever a frame draws the
//! card of the final loaded item, the panel records that item's id. App
//! takes it after the frame and hands it to the loader, which ignores it
//! unless the id is still the last one and the loader is idle.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::api::models::{Artwork, ArtworkId};
use crate::gallery::{GalleryLoader, LoadState};
use crate::tui::layout::{grid_columns, CARD_HEIGHT};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Gallery grid state: selection and row scroll
pub struct GalleryPanel {
    /// Index of the selected card
    pub selected: usize,

    /// Cached item count (synced by App and on every render)
    item_count: usize,

    /// Columns used by the last render (navigation needs it)
    columns: usize,

    /// Scroll position in grid rows
    scroll: ScrollState,

    /// Id of the last item if the previous frame drew it
    trigger: Option<ArtworkId>,
}

/// What the footer line says about the loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    Loading,
    Idle { count: usize },
    Exhausted { count: usize },
    Error(String),
}

impl Footer {
    pub fn from_state(state: &LoadState, count: usize) -> Self {
        match state {
            LoadState::Idle => Footer::Idle { count },
            LoadState::Loading => Footer::Loading,
            LoadState::Exhausted => Footer::Exhausted { count },
            LoadState::Error(msg) => Footer::Error(msg.clone()),
        }
    }

    fn text(&self, spinner: char) -> String {
        match self {
            Footer::Loading => format!("{} Loading more artworks...", spinner),
            Footer::Idle { count } => format!("{} artworks", count),
            Footer::Exhausted { count } => {
                format!("You've reached the end of the collection · {} artworks", count)
            }
            Footer::Error(msg) => format!("⚠ {} · press r to retry", msg),
        }
    }
}

impl GalleryPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            item_count: 0,
            columns: 1,
            scroll: ScrollState::manual(),
            trigger: None,
        }
    }

    /// Back to the top with nothing selected (gallery reload)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Sync the item count, clamping the selection
    pub fn sync_items(&mut self, count: usize) {
        self.item_count = count;
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Hand over the near-end trigger recorded by the last frame
    pub fn take_trigger(&mut self) -> Option<ArtworkId> {
        self.trigger.take()
    }

    fn select(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }
        self.selected = index.min(self.item_count - 1);
        self.scroll.ensure_visible(self.selected / self.columns);
    }

    fn move_down(&mut self, rows: usize) {
        let last = self.item_count.saturating_sub(1);
        let target = self.selected + self.columns * rows;
        if target <= last {
            self.select(target);
        } else if self.selected / self.columns < last / self.columns {
            // Partial last row below: land on the final card
            self.select(last);
        }
    }

    fn move_up(&mut self, rows: usize) {
        let step = self.columns * rows;
        if self.selected >= step {
            self.select(self.selected - step);
        } else {
            self.select(self.selected % self.columns);
        }
    }

    /// Render the grid and footer
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        loader: &GalleryLoader,
        theme: &Theme,
        spinner: char,
        focused: bool,
    ) {
        let (items, state) = (loader.items(), loader.state());
        self.sync_items(items.len());
        self.trigger = None;

        let border_color = if focused { theme.highlight } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(" Gallery ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        if items.is_empty() {
            render_empty(f, inner, state, theme, spinner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(CARD_HEIGHT), Constraint::Length(1)])
            .split(inner);
        let (grid_area, footer_area) = (chunks[0], chunks[1]);

        self.columns = grid_columns(grid_area.width);
        let total_rows = items.len().div_ceil(self.columns);
        let viewport_rows = (grid_area.height / CARD_HEIGHT).max(1) as usize;
        self.scroll.update_dimensions(total_rows, viewport_rows);
        self.scroll.ensure_visible(self.selected / self.columns);

        let card_width = grid_area.width / self.columns as u16;
        let (first_row, end_row) = self.scroll.visible_range();

        for (screen_row, row) in (first_row..end_row).enumerate() {
            for col in 0..self.columns {
                let index = row * self.columns + col;
                let Some(artwork) = items.get(index) else {
                    break;
                };

                let card = Rect::new(
                    grid_area.x + col as u16 * card_width,
                    grid_area.y + screen_row as u16 * CARD_HEIGHT,
                    card_width,
                    CARD_HEIGHT,
                )
                .intersection(grid_area);
                render_card(f, card, artwork, theme, focused && index == self.selected);

                if index + 1 == items.len() {
                    self.trigger = Some(artwork.id);
                }
            }
        }

        let footer = Footer::from_state(state, items.len());
        let footer_style = match footer {
            Footer::Error(_) => Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
            Footer::Loading => Style::default().fg(theme.spinner),
            _ => Style::default().fg(theme.end_marker),
        };
        f.render_widget(
            Paragraph::new(footer.text(spinner))
                .style(footer_style)
                .alignment(Alignment::Center),
            footer_area,
        );

        render_scrollbar(f, grid_area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Default for GalleryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for GalleryPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if self.item_count == 0 {
            return Handled::No;
        }

        let page_rows = self.scroll.viewport().max(1);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.select(self.selected.saturating_sub(1));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select(self.selected + 1);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(page_rows),
            KeyCode::PageDown => self.move_down(page_rows),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(self.item_count - 1),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←↑↓→:move  Enter:open  y:copy link  R:reload")
    }
}

/// One artwork card: title (bold) and artist (muted)
fn render_card(f: &mut Frame, area: Rect, artwork: &Artwork, theme: &Theme, selected: bool) {
    let (border_style, bg) = if selected {
        (
            Style::default().fg(theme.highlight),
            Style::default().bg(theme.selection),
        )
    } else {
        (Style::default().fg(theme.border), Style::default())
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let title_style = if selected {
        Style::default()
            .fg(theme.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.artwork_title)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(
            fit_width(&artwork.display_title(), inner_width),
            title_style,
        )),
        Line::from(Span::styled(
            fit_width(artwork.display_artist(), inner_width),
            Style::default().fg(theme.artist),
        )),
    ];

    let card = Paragraph::new(lines).style(bg).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(border_style),
    );
    f.render_widget(card, area);
}

/// Loader state when there is nothing to draw yet
fn render_empty(f: &mut Frame, area: Rect, state: &LoadState, theme: &Theme, spinner: char) {
    let lines = match state {
        LoadState::Idle | LoadState::Loading => vec![Line::from(Span::styled(
            format!("{} Loading artworks...", spinner),
            Style::default().fg(theme.spinner),
        ))],
        LoadState::Error(msg) => vec![
            Line::from(Span::styled(
                "Failed to load artworks",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(msg.clone(), Style::default().fg(theme.error))),
            Line::raw(""),
            Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(theme.muted),
            )),
        ],
        LoadState::Exhausted => vec![Line::from(Span::styled(
            "No artworks with images found",
            Style::default().fg(theme.muted),
        ))],
    };

    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, top, area.width, height.min(area.height));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered,
    );
}

/// Truncate to a display width, marking the cut with "…"
fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Panel with `count` items laid out in `columns` columns and `rows` visible rows
    fn panel(count: usize, columns: usize, rows: usize) -> GalleryPanel {
        let mut panel = GalleryPanel::new();
        panel.columns = columns;
        panel.sync_items(count);
        panel
            .scroll
            .update_dimensions(count.div_ceil(columns), rows);
        panel
    }

    #[test]
    fn test_horizontal_moves_are_bounded() {
        let mut p = panel(5, 3, 2);
        p.handle_key(key(KeyCode::Left));
        assert_eq!(p.selected, 0);

        for _ in 0..10 {
            p.handle_key(key(KeyCode::Right));
        }
        assert_eq!(p.selected, 4);
    }

    #[test]
    fn test_down_into_partial_row_lands_on_last() {
        // Rows: [0 1 2] [3 4]
        let mut p = panel(5, 3, 2);
        p.handle_key(key(KeyCode::Right));
        p.handle_key(key(KeyCode::Right));
        assert_eq!(p.selected, 2);

        p.handle_key(key(KeyCode::Down));
        assert_eq!(p.selected, 4);

        // Already on the last row: stays put
        p.handle_key(key(KeyCode::Down));
        assert_eq!(p.selected, 4);

        p.handle_key(key(KeyCode::Up));
        assert_eq!(p.selected, 1);
    }

    #[test]
    fn test_selection_scrolls_rows_into_view() {
        let mut p = panel(30, 3, 2);
        p.handle_key(key(KeyCode::End));
        assert_eq!(p.selected, 29);
        assert_eq!(p.scroll.visible_range(), (8, 10));

        p.handle_key(key(KeyCode::Home));
        assert_eq!(p.scroll.visible_range(), (0, 2));
    }

    #[test]
    fn test_empty_gallery_ignores_navigation() {
        let mut p = panel(0, 3, 2);
        assert_eq!(p.handle_key(key(KeyCode::Down)), Handled::No);
    }

    #[test]
    fn test_sync_clamps_selection() {
        let mut p = panel(10, 2, 3);
        p.handle_key(key(KeyCode::End));
        p.sync_items(4);
        assert_eq!(p.selected, 3);
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(
            Footer::from_state(&LoadState::Exhausted, 7).text('*'),
            "You've reached the end of the collection · 7 artworks"
        );
        assert!(Footer::from_state(&LoadState::Error("boom".into()), 3)
            .text('*')
            .contains("press r to retry"));
        assert_eq!(
            Footer::from_state(&LoadState::Loading, 3).text('*'),
            "* Loading more artworks..."
        );
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("Nighthawks", 20), "Nighthawks");
        assert_eq!(fit_width("Nighthawks", 6), "Night…");
        assert_eq!(fit_width("Nighthawks", 0), "");
    }
}
