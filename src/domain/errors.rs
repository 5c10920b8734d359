//! Domain layer error types
//!
//! Startup and platform failures are `QuickSwitchError`; the outcome of a
//! failed focus switch is `SwitchError`. Only the former is ever fatal.

use thiserror::Error;

use crate::domain::value_objects::WindowRef;

/// Main error type for startup and platform operations
#[derive(Error, Debug)]
pub enum QuickSwitchError {
    /// The low-level keyboard hook could not be installed
    #[error("Failed to install keyboard hook: {0}")]
    HookInstall(String),

    /// A window class could not be registered
    #[error("Failed to register window class '{class}': {reason}")]
    ClassRegistration { class: String, reason: String },

    /// A window could not be created
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// Text could not be measured for an overlay
    #[error("Failed to measure text: {0}")]
    TextMeasure(String),

    /// Another instance already owns the single-instance lock
    #[error("Another instance is already running")]
    AlreadyRunning,

    /// IO error (wrapped)
    #[error("IO error: {0}")]
    Io(String),

    /// Raw platform error
    #[cfg(windows)]
    #[error("Win32 error: {0}")]
    Win32(#[from] windows::core::Error),
}

impl From<std::io::Error> for QuickSwitchError {
    fn from(err: std::io::Error) -> Self {
        QuickSwitchError::Io(err.to_string())
    }
}

/// Why a switch request did not bring its target to the foreground
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchError {
    /// The reference is null (slot never bound, or bound while no window had focus)
    #[error("No window bound")]
    Unbound,

    /// The window no longer exists
    #[error("Invalid window handle {0}")]
    InvalidWindow(WindowRef),

    /// The OS foreground-lock policy refused the change
    #[error("Foreground change to {0} refused by the system")]
    Refused(WindowRef),
}
