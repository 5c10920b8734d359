//! Adapters Layer - handlers that connect OS callbacks to the services

pub mod controllers;

pub use controllers::{HostController, InputInterceptor};
