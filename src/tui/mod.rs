// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, fetch completions)
// - Spawning the fetches App queues
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod fetch;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod views;

use crate::api::ArticClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Screen};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fetch::FetchEvent;
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::Handled;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done (also when the loop fails).
pub async fn run_tui(log_buffer: LogBuffer, config: Config) -> Result<()> {
    let client = ArticClient::new(&config.api)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(log_buffer, &config);
    tracing::info!("Browsing {} ({} per page)", config.api.api_url, config.gallery.page_size);

    let result = run_event_loop(&mut terminal, &mut app, &client).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each iteration draws, feeds the near-end trigger from that frame to the
/// loader, spawns whatever App queued, then waits on whichever of input,
/// tick or fetch completion arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ArticClient,
) -> Result<()> {
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchEvent>(64);
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    app.start();

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        app.check_near_end();
        for request in app.take_requests() {
            fetch::dispatch(client, &fetch_tx, request);
        }

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(fetch_event) = fetch_rx.recv() => {
                app.handle_fetch_event(fetch_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Screen → Component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    if handle_screen_keys(app, &key_event) {
        return;
    }

    app.dispatch_to_focused(key_event);
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() {
        return;
    }

    let code = match mouse_event.kind {
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return,
    };
    // Synthesize a key event for trait dispatch
    app.dispatch_to_focused(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        KeyCode::Char('t') => app.next_theme(),
        KeyCode::Char('L') => app.toggle_logs(),
        KeyCode::Tab => {
            if app.screen() == Screen::Gallery {
                app.focus_next();
            }
        }
        // Copy to clipboard: y = readable, Y = JSON
        KeyCode::Char('y') => {
            if let Some((text, what)) = app.copy_current_readable() {
                app.toast = Some(clipboard::copy_with_toast(&text, what));
            }
        }
        KeyCode::Char('Y') => {
            if let Some(json) = app.copy_current_json() {
                app.toast = Some(clipboard::copy_with_toast(&json, "record JSON"));
            }
        }
        _ => return false,
    }
    true
}

/// Screen actions - returns true if handled
fn handle_screen_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match (app.screen(), key_event.code) {
        (Screen::Gallery, KeyCode::Enter) => {
            if app.focused == scroll::FocusablePanel::Gallery {
                app.open_selected();
                return true;
            }
            false
        }
        (Screen::Gallery, KeyCode::Char('r')) => {
            app.retry();
            true
        }
        (Screen::Gallery, KeyCode::Char('R')) => {
            app.reload();
            true
        }
        (Screen::Detail, KeyCode::Esc | KeyCode::Backspace) => {
            app.close_detail();
            true
        }
        // Detail is stateless: re-mounting is the retry
        (Screen::Detail, KeyCode::Char('r')) => {
            if let Some(id) = app.detail.as_ref().map(|view| view.id) {
                app.open_detail(id);
            }
            true
        }
        _ => false,
    }
}
