//! Clipboard access for `y` / `Y`
//!
//! Uses `arboard`; a fresh handle is opened per copy. Failures (no display
//! server, permission denied) are reported as an error toast and logged.

use super::components::Toast;
use anyhow::{Context, Result};
use arboard::Clipboard;

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy `text` and describe the outcome; `what` names the content
pub fn copy_with_toast(text: &str, what: &str) -> Toast {
    match copy_to_clipboard(text) {
        Ok(()) => {
            tracing::debug!("Copied {} ({} bytes)", what, text.len());
            Toast::new(format!("✓ Copied {}", what))
        }
        Err(e) => {
            tracing::warn!("Clipboard copy of {} failed: {:#}", what, e);
            Toast::error("✗ Failed to copy")
        }
    }
}
