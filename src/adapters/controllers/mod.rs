//! Controllers - handlers the platform layer dispatches into

pub mod host_controller;
pub mod input_interceptor;

pub use host_controller::HostController;
pub use input_interceptor::InputInterceptor;
