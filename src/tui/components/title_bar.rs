// Title bar component
//
// Renders the app title with a loading indicator and the current location.

use crate::tui::app::{App, Screen};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
///
/// Shows the app name, a spinner while any fetch is in flight, and a
/// breadcrumb naming the open artwork.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let busy = if app.is_busy() {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let title_text = format!(" 🖼  Art Institute of Chicago{} ──── {}", busy, breadcrumb(app));

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}

fn breadcrumb(app: &App) -> String {
    match (app.screen(), app.detail.as_ref()) {
        (Screen::Detail, Some(view)) => match view.artwork() {
            Some(artwork) => format!("Gallery › {}", artwork.display_title()),
            None => format!("Gallery › #{}", view.id),
        },
        _ => "Gallery".to_string(),
    }
}
