//! Key chord value objects - classification of low-level key events
//!
//! A chord is a Windows-logo key plus a digit, optionally with Shift.
//! Modifier state is never stored; it is sampled per event through
//! `KeyStatePort`.

use crate::application::ports::KeyStatePort;
use crate::domain::value_objects::Slot;

/// Kind of low-level keyboard event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    KeyDown,
    SysKeyDown,
    KeyUp,
    SysKeyUp,
}

impl KeyEventKind {
    pub fn is_press(&self) -> bool {
        matches!(self, KeyEventKind::KeyDown | KeyEventKind::SysKeyDown)
    }
}

/// A keyboard event as delivered by the low-level hook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub vk_code: u32,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, vk_code: u32) -> Self {
        Self { kind, vk_code }
    }

    pub fn down(vk_code: u32) -> Self {
        Self::new(KeyEventKind::KeyDown, vk_code)
    }
}

/// Modifier keys the interceptor samples
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    LeftWin,
    RightWin,
    Shift,
}

/// What a qualifying chord asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordAction {
    /// Win+Shift+digit: remember the foreground window in the slot
    Bind(Slot),
    /// Win+digit: bring the slot's window to the foreground
    Switch(Slot),
}

/// Classify an event, sampling modifier state only as far as needed
pub fn classify<K: KeyStatePort + ?Sized>(event: KeyEvent, keys: &K) -> Option<ChordAction> {
    if !event.kind.is_press() {
        return None;
    }

    if !(keys.is_down(ModifierKey::LeftWin) || keys.is_down(ModifierKey::RightWin)) {
        return None;
    }

    let slot = Slot::from_vk(event.vk_code)?;

    if keys.is_down(ModifierKey::Shift) {
        Some(ChordAction::Bind(slot))
    } else {
        Some(ChordAction::Switch(slot))
    }
}
