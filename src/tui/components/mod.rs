// Components module - reusable UI building blocks
//
// Shell components are rendered in every view:
// - Title bar: App name, loading indicator, breadcrumb
// - Status bar: Gallery progress and key hints
// - Logs panel: System log entries
//
// Content components fill the main area: the gallery grid, or the detail
// panel with its image preview.

pub mod detail_panel;
pub mod gallery_panel;
pub mod logs_panel;
pub mod preview;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
