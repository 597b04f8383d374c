// Views module - screen-level rendering logic
//
// The shell (title, optional logs, status) is shared; the content slot
// holds either the gallery grid or the mounted artwork detail.

mod modal;

use super::app::{App, Screen};
use super::components::{self, logs_panel};
use super::scroll::FocusablePanel;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);
    render_content(f, chunks[1], app);
    if app.show_logs {
        render_logs(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}

fn render_content(f: &mut Frame, area: Rect, app: &mut App) {
    let spinner = app.spinner_char();
    match app.screen() {
        Screen::Gallery => {
            let focused = app.is_focused(FocusablePanel::Gallery);
            app.gallery_panel
                .render(f, area, &app.loader, &app.theme, spinner, focused);
        }
        Screen::Detail => {
            if let Some(view) = app.detail.as_ref() {
                app.detail_panel.render(f, area, view, &app.theme, spinner);
            }
        }
    }
}

fn render_logs(f: &mut Frame, area: Rect, app: &mut App) {
    let entries = logs_panel::recent_entries(&app.log_buffer);
    let viewport = area.height.saturating_sub(2) as usize;
    app.logs_panel.sync_entries(entries, viewport);

    let focused = app.is_focused(FocusablePanel::Logs);
    app.logs_panel.render(f, area, &app.theme, focused);
}
