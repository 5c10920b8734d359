//! Quick Switch - bind windows to Win+digit hotkeys and jump back to them
//!
//! Win+Shift+1..9 remembers the foreground window in a slot and shows a
//! short confirmation overlay; Win+1..9 brings that window back to the
//! foreground. Everything except `platform` is free of Win32 calls, so the
//! core is tested on any host against fake ports.

pub mod log;

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod platform;
pub mod shared;

#[cfg(test)]
mod testing;
