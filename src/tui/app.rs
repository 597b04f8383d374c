// TUI application state
//
// App owns the gallery loader, the mounted detail view and all panel
// state. It never performs I/O: operations that need the network queue a
// FetchRequest, the event loop spawns it, and the completion comes back
// through `handle_fetch_event`. That keeps every state transition here
// synchronous and testable without a terminal.

use super::components::detail_panel::DetailPanel;
use super::components::gallery_panel::GalleryPanel;
use super::components::logs_panel::LogsPanel;
use super::components::Toast;
use super::fetch::{FetchEvent, FetchRequest};
use super::modal::Modal;
use super::scroll::FocusablePanel;
use super::theme::{Theme, ThemeKind};
use super::traits::{Handled, Interactive};
use crate::api::image::image_url;
use crate::api::models::{Artwork, ArtworkId};
use crate::config::Config;
use crate::gallery::detail::{describe, DetailState, DetailView, PreviewState};
use crate::gallery::{GalleryLoader, LoadOutcome, LoadState};
use crate::logging::LogBuffer;
use crossterm::event::KeyEvent;
use std::time::Instant;

/// Which screen fills the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Gallery,
    Detail,
}

/// Image settings carried from config
#[derive(Debug, Clone)]
struct ImageSettings {
    template: String,
    link_width: u32,
    preview_width: u32,
}

/// Main application state for the TUI
pub struct App {
    /// Incremental loader backing the grid
    pub loader: GalleryLoader,

    /// Bumped on reload; page completions from older generations are dropped
    generation: u64,

    pub gallery_panel: GalleryPanel,

    /// Mounted detail view (None = gallery screen)
    pub detail: Option<DetailView>,

    /// Sequence for detail mounts; completions carry it back
    detail_seq: u64,

    pub detail_panel: DetailPanel,

    pub logs_panel: LogsPanel,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    /// Whether the logs panel is shown
    pub show_logs: bool,

    /// Panel receiving navigation keys on the gallery screen
    pub focused: FocusablePanel,

    pub modal: Option<Modal>,

    pub toast: Option<Toast>,

    pub theme: Theme,

    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Animation frame counter (for spinners)
    animation_frame: usize,

    /// Requests waiting for the event loop to spawn them
    pending: Vec<FetchRequest>,

    images: ImageSettings,
}

impl App {
    pub fn new(log_buffer: LogBuffer, config: &Config) -> Self {
        Self {
            loader: GalleryLoader::new(config.gallery.page_size),
            generation: 0,
            gallery_panel: GalleryPanel::new(),
            detail: None,
            detail_seq: 0,
            detail_panel: DetailPanel::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            show_logs: false,
            focused: FocusablePanel::Gallery,
            modal: None,
            toast: None,
            theme: ThemeKind::from_name(&config.theme).theme(),
            should_quit: false,
            start_time: Instant::now(),
            animation_frame: 0,
            pending: Vec::new(),
            images: ImageSettings {
                template: config.api.image_url.clone(),
                link_width: config.api.image_width,
                preview_width: config.api.preview_width,
            },
        }
    }

    pub fn screen(&self) -> Screen {
        if self.detail.is_some() {
            Screen::Detail
        } else {
            Screen::Gallery
        }
    }

    /// Requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Gallery
    // ─────────────────────────────────────────────────────────────────────

    /// Initial mount: an empty list has no near-end trigger, so load directly
    pub fn start(&mut self) {
        if self.loader.items().is_empty() && self.loader.state() == &LoadState::Idle {
            self.load_next_page();
        }
    }

    /// Queue the next page if the loader allows it
    pub fn load_next_page(&mut self) {
        if let Some(request) = self.loader.begin_load() {
            self.pending.push(FetchRequest::Page {
                generation: self.generation,
                request,
            });
        }
    }

    /// Manual retry after a failed page
    pub fn retry(&mut self) {
        if self.loader.state().error().is_some() {
            tracing::info!("Retrying page {}", self.loader.cursor());
            self.load_next_page();
        }
    }

    /// Drop everything and start again from page 1
    pub fn reload(&mut self) {
        self.generation += 1;
        self.loader = GalleryLoader::new(self.loader.page_size());
        self.gallery_panel.reset();
        tracing::info!("Reloading gallery");
        self.load_next_page();
    }

    /// Feed the near-end trigger recorded by the last frame to the loader
    pub fn check_near_end(&mut self) {
        let Some(trigger_id) = self.gallery_panel.take_trigger() else {
            return;
        };
        if self.screen() != Screen::Gallery {
            return;
        }
        if let Some(request) = self.loader.on_near_end(trigger_id) {
            self.pending.push(FetchRequest::Page {
                generation: self.generation,
                request,
            });
        }
    }

    pub fn selected_artwork(&self) -> Option<&Artwork> {
        self.loader.items().get(self.gallery_panel.selected)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Detail
    // ─────────────────────────────────────────────────────────────────────

    /// Open the detail screen for the selected artwork
    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_artwork().map(|a| a.id) {
            self.open_detail(id);
        }
    }

    /// Mount a fresh detail view; always issues a new request
    pub fn open_detail(&mut self, id: ArtworkId) {
        self.detail_seq += 1;
        self.detail = Some(DetailView::mount(id, self.detail_seq));
        self.detail_panel.reset();
        self.pending.push(FetchRequest::Detail {
            seq: self.detail_seq,
            id,
        });
    }

    /// Back to the gallery; in-flight detail fetches become stale
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_panel.reset();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fetch completions
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Page {
                generation,
                request,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping page {} from previous gallery generation",
                        request.page
                    );
                    return;
                }
                let outcome = self.loader.complete(request, result);
                self.gallery_panel.sync_items(self.loader.items().len());

                // Whole page filtered out and nothing to show: no trigger will fire
                if matches!(outcome, LoadOutcome::Appended { .. })
                    && self.loader.items().is_empty()
                {
                    self.load_next_page();
                }
            }
            FetchEvent::Detail { seq, result } => {
                let Some(view) = self.detail.as_mut() else {
                    tracing::debug!("Dropping detail completion {} (view closed)", seq);
                    return;
                };
                if !view.complete(seq, result) {
                    tracing::debug!("Dropping stale detail completion {}", seq);
                    return;
                }

                if let DetailState::Ready(artwork) = view.state() {
                    let link = artwork
                        .image_ref()
                        .map(|id| image_url(&self.images.template, id, self.images.link_width));
                    let text = describe(artwork, link.as_deref());
                    let data = serde_json::to_string_pretty(&**artwork).ok();
                    self.detail_panel.set_content(text, data);
                }

                if let Some(image_id) = view.begin_preview() {
                    self.pending.push(FetchRequest::Preview {
                        seq,
                        image_id,
                        width: self.images.preview_width,
                    });
                }
            }
            FetchEvent::Preview { seq, result } => {
                let applied = self
                    .detail
                    .as_mut()
                    .is_some_and(|view| view.complete_preview(seq, result));
                if !applied {
                    tracing::debug!("Dropping stale preview completion {}", seq);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input routing
    // ─────────────────────────────────────────────────────────────────────

    /// Route a key to the panel that owns it on the current screen
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.screen() {
            Screen::Detail => self.detail_panel.handle_key(key),
            Screen::Gallery => match self.focused {
                FocusablePanel::Gallery => self.gallery_panel.handle_key(key),
                FocusablePanel::Logs => self.logs_panel.handle_key(key),
            },
        }
    }

    /// Key hints for the status bar
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.screen() {
            Screen::Detail => self.detail_panel.focus_hint(),
            Screen::Gallery => match self.focused {
                FocusablePanel::Gallery => self.gallery_panel.focus_hint(),
                FocusablePanel::Logs => self.logs_panel.focus_hint(),
            },
        }
    }

    pub fn is_focused(&self, panel: FocusablePanel) -> bool {
        self.screen() == Screen::Gallery && self.focused == panel
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next(self.show_logs);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs {
            self.focused = FocusablePanel::Gallery;
        }
    }

    pub fn next_theme(&mut self) {
        self.theme = self.theme.kind.next().theme();
        self.show_toast(format!("Theme: {}", self.theme.name()));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Clipboard content
    // ─────────────────────────────────────────────────────────────────────

    /// Readable text for `y`: detail record, selected log line or image link
    pub fn copy_current_readable(&self) -> Option<(String, &'static str)> {
        use super::traits::Copyable;

        match self.screen() {
            Screen::Detail => self.detail_panel.copy_text().map(|t| (t, "artwork details")),
            Screen::Gallery if self.focused == FocusablePanel::Logs => self
                .logs_panel
                .selected_entry_text()
                .map(|t| (t, "log line")),
            Screen::Gallery => self
                .selected_artwork()
                .and_then(|a| a.image_ref())
                .map(|id| {
                    (
                        image_url(&self.images.template, id, self.images.link_width),
                        "image link",
                    )
                }),
        }
    }

    /// JSON for `Y`: the record behind the current view
    pub fn copy_current_json(&self) -> Option<String> {
        use super::traits::Copyable;

        match self.screen() {
            Screen::Detail => self.detail_panel.copy_data(),
            Screen::Gallery => self
                .selected_artwork()
                .and_then(|a| serde_json::to_string_pretty(a).ok()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Animation and toasts
    // ─────────────────────────────────────────────────────────────────────

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Whether any fetch the user is waiting on is in flight
    pub fn is_busy(&self) -> bool {
        self.loader.state().is_loading()
            || self.detail.as_ref().is_some_and(|view| {
                matches!(view.state(), DetailState::Loading)
                    || matches!(view.preview(), PreviewState::Loading)
            })
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Uptime as "1h 02m" / "3m 04s"
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        if secs >= 3600 {
            format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}m {:02}s", secs / 60, secs % 60)
        }
    }
}
