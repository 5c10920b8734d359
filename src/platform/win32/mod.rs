//! Win32 platform layer
//!
//! Thin wrappers around user32/gdi32/shell32. Every window, the keyboard
//! hook and the message loop live on the thread that calls into here.

pub mod desktop;
pub mod dpi;
pub mod event;
pub mod hook;
pub mod instance;
pub mod overlay;
pub mod tray;
pub mod window;

pub use desktop::Win32Desktop;
pub use dpi::enable_dpi_awareness;
pub use event::run_message_loop;
pub use hook::KeyboardHook;
pub use instance::SingleInstance;
pub use overlay::{GdiOverlaySurface, PostedCloser};
pub use tray::TrayIcon;
pub use window::{
    clear_host_handler, create_host_window, destroy_window, discard_overlay_requests,
    register_window_classes, set_host_handler, show_fatal_error, unregister_window_classes,
    PostedNotifier,
};
