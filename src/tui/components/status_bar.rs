// Status bar component
//
// Renders gallery progress on the left and key hints for the focused panel.

use crate::gallery::LoadState;
use crate::tui::app::{App, Screen};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: progress, uptime and key hints
/// - Narrow: progress only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let progress = progress_text(app);

    let status_text = if bp.at_least(Breakpoint::Wide) {
        match app.focus_hint() {
            Some(hint) => format!(" {} │ ⏱ {} │ {}", progress, app.uptime(), hint),
            None => format!(" {} │ ⏱ {}", progress, app.uptime()),
        }
    } else {
        format!(" {}", progress)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

fn progress_text(app: &App) -> String {
    if let (Screen::Detail, Some(view)) = (app.screen(), app.detail.as_ref()) {
        return format!("Artwork {}", view.id);
    }

    let count = app.loader.items().len();
    let pages = app.loader.cursor().saturating_sub(1);
    match app.loader.state() {
        LoadState::Exhausted => format!("🖼 {} │ 📄 {} │ end", count, pages),
        LoadState::Error(_) => format!("🖼 {} │ 📄 {} │ ⚠ error", count, pages),
        LoadState::Loading => format!("🖼 {} │ 📄 {} │ ⟳ page {}", count, pages, app.loader.cursor()),
        LoadState::Idle => format!("🖼 {} │ 📄 {}", count, pages),
    }
}
