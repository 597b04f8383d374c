//! Interactive trait for components that handle keyboard input
//!
//! The App routes keys to the focused component after global handling.

use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for fallback handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Modal (absorbs everything while open)
///    │
///    ▼
/// App (global keys: ?, q, t, L, Tab, y, Y)
///    │
///    ▼
/// App (screen actions: Enter, Esc, r, R)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
///    returns Handled::Yes or Handled::No
/// ```
pub trait Interactive {
    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
