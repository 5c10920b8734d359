//! Domain Layer - slots, window references and key chords
//!
//! Contains no platform code; everything here is testable on any host.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{QuickSwitchError, SwitchError};
