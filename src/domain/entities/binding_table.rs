//! BindingTable entity - the slot-to-window mapping
//!
//! Written and read only from the keyboard hook, whose invocations are
//! delivered serially on one thread, so the table carries no lock.

use crate::domain::value_objects::{Slot, WindowRef, SLOT_COUNT};

/// Fixed-size table of remembered windows, one entry per slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable {
    slots: [Option<WindowRef>; SLOT_COUNT],
}

impl BindingTable {
    /// Create a table with every slot unbound
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot, returning whatever it held before
    pub fn bind(&mut self, slot: Slot, window: Option<WindowRef>) -> Option<WindowRef> {
        std::mem::replace(&mut self.slots[slot.index()], window)
    }

    /// Window remembered for a slot, if any
    pub fn get(&self, slot: Slot) -> Option<WindowRef> {
        self.slots[slot.index()]
    }

    /// Number of slots currently holding a window
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate over (slot, binding) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<WindowRef>)> + '_ {
        Slot::all().zip(self.slots.iter().copied())
    }
}
