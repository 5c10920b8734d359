//! Application Services - the binding, switching and overlay core

pub mod overlay_manager;
pub mod switch_engine;
pub mod timer_service;
pub mod window_titles;

pub use overlay_manager::{OverlayManager, OverlayStyle};
pub use switch_engine::SwitchEngine;
pub use timer_service::TimerService;
pub use window_titles::{bind_confirmation, window_title};
