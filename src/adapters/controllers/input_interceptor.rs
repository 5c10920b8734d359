//! InputInterceptor - the low-level keyboard handler
//!
//! Classifies every key event and runs the bind or switch path. It owns the
//! binding table outright: hook invocations are serial, so the table needs
//! no lock. Nothing here may block; confirmation text is handed to an
//! `OverlayNotifier` that defers the actual popup.

use tracing::{debug, info, warn};

use crate::application::ports::{
    HookDecision, KeyStatePort, KeyboardHandler, OverlayNotifier, WindowPort,
};
use crate::application::services::{bind_confirmation, window_title, SwitchEngine};
use crate::domain::entities::BindingTable;
use crate::domain::errors::SwitchError;
use crate::domain::value_objects::{classify, ChordAction, KeyEvent, Slot, WindowRef};

/// Keyboard handler implementing the bind and switch chords
pub struct InputInterceptor<W, K, N>
where
    W: WindowPort,
    K: KeyStatePort,
    N: OverlayNotifier,
{
    bindings: BindingTable,
    engine: SwitchEngine<W>,
    keys: K,
    notifier: N,
}

impl<W, K, N> InputInterceptor<W, K, N>
where
    W: WindowPort,
    K: KeyStatePort,
    N: OverlayNotifier,
{
    pub fn new(windows: W, keys: K, notifier: N) -> Self {
        Self {
            bindings: BindingTable::new(),
            engine: SwitchEngine::new(windows),
            keys,
            notifier,
        }
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Remember the foreground window in `slot` and announce it
    pub fn bind(&mut self, slot: Slot) -> Option<WindowRef> {
        let windows = self.engine.windows();
        let current = windows.foreground_window();
        self.bindings.bind(slot, current);

        match current {
            Some(window) => info!(%slot, %window, "Remembered window"),
            None => info!(%slot, "No foreground window; slot cleared"),
        }

        let title = window_title(windows, current);
        self.notifier.notify(bind_confirmation(&title, slot));
        current
    }

    /// Bring the window remembered in `slot` to the foreground
    pub fn switch(&self, slot: Slot) -> Result<WindowRef, SwitchError> {
        let target = self.bindings.get(slot);
        debug!(%slot, ?target, "Switching to window");

        let result = self.engine.switch_to(target);
        match &result {
            Ok(window) => info!(%slot, %window, "Switched"),
            Err(e) => warn!(%slot, "Failed to switch window: {}", e),
        }
        result
    }
}

impl<W, K, N> KeyboardHandler for InputInterceptor<W, K, N>
where
    W: WindowPort,
    K: KeyStatePort,
    N: OverlayNotifier,
{
    fn on_key(&mut self, event: KeyEvent) -> HookDecision {
        match classify(event, &self.keys) {
            None => HookDecision::PassThrough,
            Some(ChordAction::Bind(slot)) => {
                self.bind(slot);
                HookDecision::Consume
            }
            Some(ChordAction::Switch(slot)) => {
                // Consumed whether or not the switch worked
                let _ = self.switch(slot);
                HookDecision::Consume
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{OverlayManager, OverlayStyle};
    use crate::domain::value_objects::{KeyEventKind, ModifierKey};
    use crate::testing::{FakeDesktop, FakeSurface, ManualScheduler, RecordingNotifier};

    const VK_1: u32 = 0x31;
    const VK_3: u32 = 0x33;

    type TestInterceptor = InputInterceptor<FakeDesktop, FakeDesktop, RecordingNotifier>;

    fn interceptor() -> (FakeDesktop, RecordingNotifier, TestInterceptor) {
        let desktop = FakeDesktop::new();
        let notifier = RecordingNotifier::new();
        let interceptor = InputInterceptor::new(desktop.clone(), desktop.clone(), notifier.clone());
        (desktop, notifier, interceptor)
    }

    fn press_bind(desktop: &FakeDesktop, handler: &mut impl KeyboardHandler, vk: u32) -> HookDecision {
        desktop.hold(&[ModifierKey::LeftWin, ModifierKey::Shift]);
        handler.on_key(KeyEvent::down(vk))
    }

    fn press_switch(desktop: &FakeDesktop, handler: &mut impl KeyboardHandler, vk: u32) -> HookDecision {
        desktop.hold(&[ModifierKey::LeftWin]);
        handler.on_key(KeyEvent::down(vk))
    }

    #[test]
    fn test_unrelated_keys_pass_through() {
        let (desktop, notifier, mut interceptor) = interceptor();
        let editor = desktop.open_window(0x10, "Editor", 20);
        desktop.focus(editor);

        desktop.hold(&[]);
        assert_eq!(interceptor.on_key(KeyEvent::down(VK_1)), HookDecision::PassThrough);

        desktop.hold(&[ModifierKey::LeftWin, ModifierKey::Shift]);
        assert_eq!(
            interceptor.on_key(KeyEvent::new(KeyEventKind::KeyUp, VK_1)),
            HookDecision::PassThrough
        );
        assert_eq!(interceptor.on_key(KeyEvent::down(0x30)), HookDecision::PassThrough);

        assert_eq!(interceptor.bindings().bound_count(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_bind_then_switch_every_slot() {
        let (desktop, _notifier, mut interceptor) = interceptor();
        let other = desktop.open_window(0xF00, "Other", 99);

        for slot in Slot::all() {
            let vk = VK_1 + slot.index() as u32;
            let window = desktop.open_window(0x100 + slot.index() as isize, "w", 20);
            desktop.focus(window);
            assert_eq!(press_bind(&desktop, &mut interceptor, vk), HookDecision::Consume);

            desktop.focus(other);
            assert_eq!(press_switch(&desktop, &mut interceptor, vk), HookDecision::Consume);
            assert_eq!(desktop.foreground(), Some(window));
            assert_eq!(desktop.foreground_requests().last(), Some(&window));
        }
    }

    #[test]
    fn test_bind_does_not_touch_other_slots() {
        let (desktop, _notifier, mut interceptor) = interceptor();
        let first = desktop.open_window(0x10, "First", 20);
        let second = desktop.open_window(0x20, "Second", 30);

        desktop.focus(first);
        press_bind(&desktop, &mut interceptor, VK_1);
        desktop.focus(second);
        press_bind(&desktop, &mut interceptor, VK_3);

        let one = Slot::from_index(0).unwrap();
        let three = Slot::from_index(2).unwrap();
        assert_eq!(interceptor.bindings().get(one), Some(first));
        assert_eq!(interceptor.bindings().get(three), Some(second));
        assert_eq!(interceptor.bindings().bound_count(), 2);
    }

    #[test]
    fn test_notepad_scenario() {
        let (desktop, notifier, mut interceptor) = interceptor();
        let notepad = desktop.open_window(0x1234, "Notepad", 20);
        let browser = desktop.open_window(0x5678, "Browser", 30);

        desktop.focus(notepad);
        assert_eq!(press_bind(&desktop, &mut interceptor, VK_3), HookDecision::Consume);
        assert_eq!(
            interceptor.bindings().get(Slot::from_index(2).unwrap()),
            Some(notepad)
        );
        assert_eq!(notifier.messages(), vec!["Window 'Notepad' bound to WIN+3"]);

        desktop.focus(browser);
        press_switch(&desktop, &mut interceptor, VK_3);
        assert_eq!(desktop.foreground(), Some(notepad));

        // Closed meanwhile: the switch fails and nothing else changes
        desktop.focus(browser);
        desktop.close_window(notepad);
        assert_eq!(press_switch(&desktop, &mut interceptor, VK_3), HookDecision::Consume);
        assert_eq!(desktop.foreground(), Some(browser));
        assert_eq!(
            interceptor.bindings().get(Slot::from_index(2).unwrap()),
            Some(notepad)
        );
        assert_eq!(notifier.messages().len(), 1);
    }

    #[test]
    fn test_switch_on_unbound_slot_is_consumed() {
        let (desktop, notifier, mut interceptor) = interceptor();
        let editor = desktop.open_window(0x10, "Editor", 20);
        desktop.focus(editor);

        assert_eq!(press_switch(&desktop, &mut interceptor, VK_1), HookDecision::Consume);
        assert_eq!(
            interceptor.switch(Slot::from_index(0).unwrap()),
            Err(SwitchError::Unbound)
        );
        assert_eq!(desktop.foreground(), Some(editor));
        assert_eq!(interceptor.bindings().bound_count(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_bind_untitled_window() {
        let (desktop, notifier, mut interceptor) = interceptor();
        let untitled = desktop.open_window(0x10, "", 20);
        desktop.focus(untitled);

        press_bind(&desktop, &mut interceptor, VK_1);
        assert_eq!(notifier.messages(), vec!["Window '' bound to WIN+1"]);
    }

    #[test]
    fn test_rapid_rebinds_keep_last_window_and_one_overlay() {
        let desktop = FakeDesktop::new();
        let surface = FakeSurface::new();
        let overlays = OverlayManager::new(
            surface.clone(),
            ManualScheduler::new(),
            OverlayStyle::default(),
        );
        let mut interceptor = InputInterceptor::new(desktop.clone(), desktop.clone(), overlays);

        let mut last = None;
        for i in 0..10 {
            let window = desktop.open_window(0x100 + i, &format!("Window {}", i), 20);
            desktop.focus(window);
            press_bind(&desktop, &mut interceptor, VK_3);
            assert!(surface.live_windows().len() <= 1);
            last = Some(window);
        }

        assert_eq!(
            interceptor.bindings().get(Slot::from_index(2).unwrap()),
            last
        );
        assert_eq!(interceptor.notifier().live_count(), 1);
        assert_eq!(
            interceptor.notifier().live_overlays()[0].text,
            "Window 'Window 9' bound to WIN+3"
        );
        assert_eq!(surface.destroyed().len(), 9);
    }
}
