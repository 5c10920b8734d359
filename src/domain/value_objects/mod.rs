//! Domain Value Objects - Immutable values that describe characteristics
//!
//! Value objects have no identity and are compared by their values.

pub mod color;
pub mod key_chord;
pub mod slot;
pub mod window_ref;

pub use color::{ColorParseError, Rgb};
pub use key_chord::{classify, ChordAction, KeyEvent, KeyEventKind, ModifierKey};
pub use slot::{Slot, SLOT_COUNT};
pub use window_ref::WindowRef;
