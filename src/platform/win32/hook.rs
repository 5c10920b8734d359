//! Low-level keyboard hook
//!
//! The hook procedure runs on the thread that installed it, serially, in
//! between messages of that thread's message loop. It forwards decoded
//! events to the registered `KeyboardHandler` and must return quickly:
//! Windows silently removes hooks that time out.

use std::cell::RefCell;

use tracing::{debug, info, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT,
    WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::application::ports::{HookDecision, KeyboardHandler};
use crate::domain::errors::QuickSwitchError;
use crate::domain::value_objects::{KeyEvent, KeyEventKind};

thread_local! {
    static KEYBOARD_HANDLER: RefCell<Option<Box<dyn KeyboardHandler>>> = RefCell::new(None);
}

/// An installed hook; unhooks on drop
pub struct KeyboardHook {
    handle: HHOOK,
}

impl KeyboardHook {
    /// Install the hook on the calling thread and route events to `handler`
    pub fn install<H: KeyboardHandler + 'static>(handler: H) -> Result<Self, QuickSwitchError> {
        KEYBOARD_HANDLER.with(|slot| *slot.borrow_mut() = Some(Box::new(handler)));

        let result = unsafe {
            GetModuleHandleW(None)
                .and_then(|module| SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), module, 0))
        };

        match result {
            Ok(handle) => {
                info!("Keyboard hook installed");
                Ok(Self { handle })
            }
            Err(e) => {
                take_handler();
                Err(QuickSwitchError::HookInstall(e.to_string()))
            }
        }
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        if let Err(e) = unsafe { UnhookWindowsHookEx(self.handle) } {
            warn!("UnhookWindowsHookEx failed: {}", e);
        }
        take_handler();
        info!("Keyboard hook removed");
    }
}

fn take_handler() {
    // Drop outside the borrow
    let handler = KEYBOARD_HANDLER.with(|slot| slot.borrow_mut().take());
    drop(handler);
}

fn event_kind(message: u32) -> Option<KeyEventKind> {
    match message {
        WM_KEYDOWN => Some(KeyEventKind::KeyDown),
        WM_SYSKEYDOWN => Some(KeyEventKind::SysKeyDown),
        WM_KEYUP => Some(KeyEventKind::KeyUp),
        WM_SYSKEYUP => Some(KeyEventKind::SysKeyUp),
        _ => None,
    }
}

fn dispatch(event: KeyEvent) -> HookDecision {
    KEYBOARD_HANDLER.with(|slot| match slot.try_borrow_mut() {
        Ok(mut handler) => handler
            .as_mut()
            .map_or(HookDecision::PassThrough, |h| h.on_key(event)),
        Err(_) => {
            // A nested event while the handler is running; let it through
            debug!("Re-entrant keyboard event vk=0x{:02X}", event.vk_code);
            HookDecision::PassThrough
        }
    })
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        if let Some(kind) = event_kind(wparam.0 as u32) {
            let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
            if dispatch(KeyEvent::new(kind, info.vkCode)) == HookDecision::Consume {
                return LRESULT(1);
            }
        }
    }
    CallNextHookEx(HHOOK::default(), code, wparam, lparam)
}
