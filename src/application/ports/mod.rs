//! Application Ports - interfaces for external dependencies
//!
//! The Win32 platform layer implements these; tests use fakes.

pub mod host_port;
pub mod key_state_port;
pub mod overlay_port;
pub mod scheduler_port;
pub mod window_port;

pub use host_port::{HookDecision, HostEvent, HostEventHandler, KeyboardHandler};
pub use key_state_port::KeyStatePort;
pub use overlay_port::{
    FontSpec, OverlayCloser, OverlayNotifier, OverlaySpec, OverlaySurface, TextExtent,
};
pub use scheduler_port::{DeferredTask, Scheduler};
pub use window_port::{ThreadId, WindowPort};
