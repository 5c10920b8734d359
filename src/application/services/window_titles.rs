//! Window title helpers for user-facing confirmation text

use crate::application::ports::WindowPort;
use crate::domain::value_objects::{Slot, WindowRef};

/// Title of a window, or empty text when there is none or the query fails
pub fn window_title<W: WindowPort + ?Sized>(windows: &W, window: Option<WindowRef>) -> String {
    window
        .and_then(|w| windows.window_text(w))
        .unwrap_or_default()
}

/// Confirmation shown after a bind chord
pub fn bind_confirmation(title: &str, slot: Slot) -> String {
    format!("Window '{}' bound to {}", title, slot)
}
