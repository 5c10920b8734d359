//! Platform abstraction layer
//!
//! Currently only Windows (win32) is supported. The rest of the crate only
//! sees the ports in `application::ports`.

#[cfg(windows)]
pub mod win32;
