//! HostPort - handler interfaces the platform layer dispatches into
//!
//! The Win32 layer owns the raw callbacks (hook procedure, window
//! procedures) and forwards decoded events to these handlers.

use crate::domain::entities::OverlayId;
use crate::domain::value_objects::KeyEvent;

/// Whether a low-level key event is swallowed or passed along the hook chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookDecision {
    PassThrough,
    Consume,
}

/// Receives every low-level keyboard event
pub trait KeyboardHandler {
    fn on_key(&mut self, event: KeyEvent) -> HookDecision;
}

/// Window-thread events raised by the host window and overlay windows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// Deferred request from the hook to display confirmation text
    ShowOverlay(String),
    /// An overlay received a close request
    OverlayCloseRequested(OverlayId),
}

/// Receives host-window events on the window-owning thread
pub trait HostEventHandler {
    fn on_host_event(&mut self, event: HostEvent);
}
