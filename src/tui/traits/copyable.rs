//! Copyable trait for components that provide clipboard content

/// Trait for components that can provide content for the clipboard
///
/// - **Text** (`y`): Human-readable format for pasting into docs, chat, etc.
/// - **Data** (`Y`): Machine-readable JSON for scripting
pub trait Copyable {
    /// Human-readable text, `None` when there is nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// Structured data; default is nothing
    fn copy_data(&self) -> Option<String> {
        None
    }
}
