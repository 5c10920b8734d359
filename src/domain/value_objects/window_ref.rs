//! WindowRef value object - a non-owning reference to an OS window
//!
//! The raw handle is kept as an integer so the reference can cross threads
//! and be compared/hashed without touching the platform layer. Holding a
//! `WindowRef` does not keep the window alive; it may go stale at any time.

use std::fmt;

/// Weak reference to a top-level OS window (never null)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowRef(isize);

impl WindowRef {
    /// Wrap a raw handle, returning `None` for the null handle
    pub fn new(raw: isize) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw handle value
    pub fn raw(&self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
