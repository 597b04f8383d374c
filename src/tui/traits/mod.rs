//! Component trait system for TUI architecture
//!
//! Panels declare their capabilities through traits instead of App knowing
//! how to scroll or copy every panel.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │     (orchestrator: routes keys, owns loader and views)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Gallery  │   │  Detail  │   │   Logs   │
//!        │  Panel   │   │  Panel   │   │  Panel   │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`Interactive`] - Components that handle keyboard input
//! - [`Scrollable`] - Components with scrollable content
//! - [`Copyable`] - Components that provide clipboard content

mod copyable;
mod interactive;
mod scrollable;

pub use copyable::Copyable;
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
