//! Slot value object - one of the numbered hotkey bindings
//!
//! Slots are addressed by the digit keys 1-9. Index 0 is digit 1.

use std::fmt;

/// Number of hotkey slots (one per digit key 1-9)
pub const SLOT_COUNT: usize = 9;

/// Virtual key code of the '1' key; '1'..'9' are contiguous
const VK_DIGIT_1: u32 = 0x31;

/// Index of a hotkey slot, always in `0..SLOT_COUNT`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    /// Create a slot from a zero-based index
    pub fn from_index(index: usize) -> Option<Self> {
        if index < SLOT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Map a virtual key code for '1'..'9' to its slot
    pub fn from_vk(vk_code: u32) -> Option<Self> {
        vk_code
            .checked_sub(VK_DIGIT_1)
            .and_then(|index| Self::from_index(index as usize))
    }

    /// Zero-based index into the binding table
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The digit the user presses for this slot (1-9)
    pub fn digit(&self) -> u8 {
        self.0 + 1
    }

    /// All slots in order
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT as u8).map(Slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WIN+{}", self.digit())
    }
}
