//! Application Layer - services and the ports they depend on
//!
//! - **Ports**: interfaces the platform layer implements (windows, key
//!   state, overlay surface, scheduler, event handlers)
//! - **Services**: switch engine, overlay manager, timer service
//!
//! Nothing here touches Win32 directly.

pub mod ports;
pub mod services;

pub use ports::*;
pub use services::*;
