//! Logs panel component
//!
//! Shows recent entries from the shared `LogBuffer` (toggled with `L`).
//! Follows new entries until the user selects one; Esc returns to follow.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Entries pulled from the buffer per frame
const VISIBLE_HISTORY: usize = 500;

/// Logs panel component
pub struct LogsPanel {
    /// Scroll state (position, viewport, auto-follow)
    scroll: ScrollState,

    /// Selected log entry index (None = auto-follow mode)
    pub selected: Option<usize>,

    /// Entries as of the last sync
    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            selected: None,
            entries: Vec::new(),
        }
    }

    /// Pull current entries (call each frame before rendering)
    pub fn sync_entries(&mut self, entries: Vec<LogEntry>, viewport_height: usize) {
        self.scroll.update_dimensions(entries.len(), viewport_height);
        if let Some(idx) = self.selected {
            if idx >= entries.len() {
                self.selected = entries.len().checked_sub(1);
            }
        }
        self.entries = entries;
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && self.selected == Some(start + i) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    log_level_style(entry.level, theme)
                };
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        let border_color = if focused { theme.highlight } else { theme.border };
        let title = if self.selected.is_some() && focused {
            " Logs [select] "
        } else if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }

    /// Formatted text of the selected entry (for clipboard)
    pub fn selected_entry_text(&self) -> Option<String> {
        self.selected
            .and_then(|idx| self.entries.get(idx))
            .map(format_log_entry)
    }

    fn select_next(&mut self) {
        let count = self.entries.len();
        match self.selected {
            Some(idx) if idx + 1 < count => {
                self.selected = Some(idx + 1);
                self.scroll.ensure_visible(idx + 1);
            }
            None if count > 0 => self.selected = Some(count - 1),
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        let count = self.entries.len();
        match self.selected {
            Some(idx) if idx > 0 => {
                self.selected = Some(idx - 1);
                self.scroll.auto_follow = false;
                self.scroll.ensure_visible(idx - 1);
            }
            None if count > 0 => self.selected = Some(count - 1),
            _ => {}
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Esc => {
                if self.selected.is_none() {
                    return Handled::No;
                }
                self.selected = None;
                self.scroll.scroll_to_bottom();
            }
            _ => return self.handle_scroll_keys(key),
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  y:copy line  Esc:follow  Tab:gallery")
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {:>8}  {}",
        entry.time_label(),
        entry.level.as_str(),
        entry.short_target(),
        entry.message
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug => Style::default().fg(theme.log_debug),
        LogLevel::Trace => Style::default().fg(theme.log_trace),
    }
}

/// Entries to show this frame
pub fn recent_entries(buffer: &crate::logging::LogBuffer) -> Vec<LogEntry> {
    buffer.recent(VISIBLE_HISTORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: Utc::now(),
                level: LogLevel::Info,
                target: "artic_tui::api".to_string(),
                message: format!("entry {}", i),
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_first_selection_starts_at_newest() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries(5), 3);

        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected, Some(4));

        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected, Some(3));
        assert!(panel.selected_entry_text().unwrap().ends_with("entry 3"));
    }

    #[test]
    fn test_esc_clears_selection_then_bubbles() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries(2), 5);
        panel.handle_key(key(KeyCode::Down));

        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::Yes);
        assert!(panel.selected.is_none());
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn test_sync_clamps_selection() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries(5), 3);
        panel.selected = Some(4);

        panel.sync_entries(entries(2), 3);
        assert_eq!(panel.selected, Some(1));
    }
}
