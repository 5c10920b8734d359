//! WindowPort - interface to the desktop's window manager
//!
//! Everything the switch engine and the bind path need to know about
//! top-level windows. Implemented over Win32 in `platform::win32::desktop`
//! and by a fake in tests.

use crate::domain::value_objects::WindowRef;

/// OS thread identifier
pub type ThreadId = u32;

/// Port interface for window queries and focus changes
pub trait WindowPort {
    /// Window currently receiving keyboard input, if any
    fn foreground_window(&self) -> Option<WindowRef>;

    /// Whether the reference still names a live window
    fn is_window(&self, window: WindowRef) -> bool;

    /// Whether the window is minimized
    fn is_minimized(&self, window: WindowRef) -> bool;

    /// Restore a minimized window to its normal state
    fn restore(&self, window: WindowRef);

    /// Thread that owns a window (0 when there is no window)
    fn window_thread(&self, window: Option<WindowRef>) -> ThreadId;

    /// Thread the caller is running on
    fn current_thread(&self) -> ThreadId;

    /// Attach or detach the input state of two threads
    fn attach_thread_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool;

    /// Move the window to the top of the z-order and show it
    fn bring_to_top(&self, window: WindowRef) -> bool;

    /// Ask the OS to make the window the foreground window
    fn set_foreground(&self, window: WindowRef) -> bool;

    /// Raw title text; `None` when the query fails
    fn window_text(&self, window: WindowRef) -> Option<String>;
}
