//! Detail panel component
//!
//! Renders one mounted `DetailView`: a status message while loading, on
//! error or when the record is absent, otherwise the image preview next to
//! (or above) the scrollable field list.
//!
//! Text is wrapped here rather than by ratatui so the scroll state knows
//! the real line count.

use super::preview;
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::api::models::Artwork;
use crate::gallery::detail::{DetailState, DetailView};
use crate::tui::layout::detail_side_by_side;
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Copyable, Handled, Interactive, Scrollable};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Detail panel state: scroll position plus cached clipboard content
pub struct DetailPanel {
    scroll: ScrollState,

    /// Readable record text (set by App when the record arrives)
    text: Option<String>,

    /// Record JSON
    data: Option<String>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            text: None,
            data: None,
        }
    }

    /// Forget scroll position and cached content (new view mounted)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Cache clipboard content for the loaded record
    pub fn set_content(&mut self, text: String, data: Option<String>) {
        self.text = Some(text);
        self.data = data;
    }

    /// Render the mounted view
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        view: &DetailView,
        theme: &Theme,
        spinner: char,
    ) {
        let title = match view.artwork() {
            Some(artwork) => format!(" Artwork {} ", artwork.id),
            None => format!(" Artwork {} ", view.id),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .title(title)
            .title_bottom(Line::from(" Esc: back ").right_aligned());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let artwork = match view.state() {
            DetailState::Ready(artwork) => artwork,
            DetailState::Loading => {
                render_message(
                    f,
                    inner,
                    vec![Line::from(Span::styled(
                        format!("{} Loading artwork...", spinner),
                        Style::default().fg(theme.spinner),
                    ))],
                );
                return;
            }
            DetailState::NotFound => {
                render_message(
                    f,
                    inner,
                    vec![
                        Line::from(Span::styled(
                            "Artwork not found",
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(
                            format!("No record with id {}", view.id),
                            Style::default().fg(theme.muted),
                        )),
                    ],
                );
                return;
            }
            DetailState::Error(msg) => {
                render_message(
                    f,
                    inner,
                    vec![
                        Line::from(Span::styled(
                            "Failed to load artwork",
                            Style::default()
                                .fg(theme.error)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::raw(""),
                        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.error))),
                    ],
                );
                return;
            }
        };

        let (image_area, text_area) = if detail_side_by_side(inner.width) {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(inner);
            (chunks[0], chunks[1])
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            (chunks[0], chunks[1])
        };

        preview::render(f, image_area, view.preview(), theme, spinner);
        self.render_fields(f, text_area, artwork, theme);
    }

    fn render_fields(&mut self, f: &mut Frame, area: Rect, artwork: &Artwork, theme: &Theme) {
        let area = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };
        let lines = record_lines(artwork, area.width as usize, theme);

        self.scroll
            .update_dimensions(lines.len(), area.height as usize);
        let (start, end) = self.scroll.visible_range();
        let visible: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

        f.render_widget(Paragraph::new(visible), area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Arrows);
    }
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollable for DetailPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for DetailPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  y:copy text  Y:copy JSON  Esc:back")
    }
}

impl Copyable for DetailPanel {
    fn copy_text(&self) -> Option<String> {
        self.text.clone()
    }

    fn copy_data(&self) -> Option<String> {
        self.data.clone()
    }
}

/// Title, artist and labelled fields, wrapped to `width`
fn record_lines(artwork: &Artwork, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let title_style = Style::default()
        .fg(theme.artwork_title)
        .add_modifier(Modifier::BOLD);

    for chunk in wrap(artwork.full_title(), width) {
        lines.push(Line::from(Span::styled(chunk, title_style)));
    }
    for chunk in wrap(artwork.display_artist(), width) {
        lines.push(Line::from(Span::styled(
            chunk,
            Style::default().fg(theme.artist),
        )));
    }
    lines.push(Line::raw(""));

    let label_style = Style::default()
        .fg(theme.field_label)
        .add_modifier(Modifier::BOLD);
    for (label, value) in artwork.detail_fields() {
        lines.push(Line::from(Span::styled(label, label_style)));
        for chunk in wrap(&value, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {}", chunk)));
        }
    }

    lines
}

/// Greedy word wrap by display width; overlong words are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
        let gap = usize::from(!current.is_empty());

        if current_width + gap + word_width <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Centered status message
fn render_message(f: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, top, area.width, height),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap("Oil on canvas, mounted on board", 14),
            vec!["Oil on canvas,", "mounted on", "board"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_record_lines_skip_missing_fields() {
        let artwork: Artwork = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Nighthawks",
            "artist_title": "Edward Hopper",
            "medium_display": "Oil on canvas"
        }))
        .unwrap();

        let lines = record_lines(&artwork, 40, &Theme::dark());
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            text,
            vec!["Nighthawks", "Edward Hopper", "", "Medium", "  Oil on canvas"]
        );
    }

    #[test]
    fn test_copy_uses_cached_content() {
        let mut panel = DetailPanel::new();
        assert!(panel.copy_text().is_none());

        panel.set_content("Nighthawks".into(), Some("{}".into()));
        assert_eq!(panel.copy_text().as_deref(), Some("Nighthawks"));
        assert_eq!(panel.copy_data().as_deref(), Some("{}"));

        panel.reset();
        assert!(panel.copy_data().is_none());
    }
}
