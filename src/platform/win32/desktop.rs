//! Win32 implementation of the window and key-state ports

use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::System::Threading::{AttachThreadInput, GetCurrentThreadId};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VIRTUAL_KEY, VK_LWIN, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId,
    IsIconic, IsWindow, SetForegroundWindow, SetWindowPos, ShowWindow, HWND_TOP, SWP_NOMOVE,
    SWP_NOSIZE, SWP_SHOWWINDOW, SW_RESTORE,
};

use crate::application::ports::{KeyStatePort, ThreadId, WindowPort};
use crate::domain::value_objects::{ModifierKey, WindowRef};

/// Rebuild an `HWND` from a raw handle value
pub(crate) fn to_hwnd(raw: isize) -> HWND {
    HWND(raw as *mut c_void)
}

/// Non-owning reference to a window; `None` for the null handle
pub(crate) fn window_ref(hwnd: HWND) -> Option<WindowRef> {
    WindowRef::new(hwnd.0 as isize)
}

/// The real desktop, driven through user32
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Desktop;

impl WindowPort for Win32Desktop {
    fn foreground_window(&self) -> Option<WindowRef> {
        window_ref(unsafe { GetForegroundWindow() })
    }

    fn is_window(&self, window: WindowRef) -> bool {
        unsafe { IsWindow(to_hwnd(window.raw())).as_bool() }
    }

    fn is_minimized(&self, window: WindowRef) -> bool {
        unsafe { IsIconic(to_hwnd(window.raw())).as_bool() }
    }

    fn restore(&self, window: WindowRef) {
        unsafe {
            let _ = ShowWindow(to_hwnd(window.raw()), SW_RESTORE);
        }
    }

    fn window_thread(&self, window: Option<WindowRef>) -> ThreadId {
        match window {
            Some(window) => unsafe { GetWindowThreadProcessId(to_hwnd(window.raw()), None) },
            None => 0,
        }
    }

    fn current_thread(&self) -> ThreadId {
        unsafe { GetCurrentThreadId() }
    }

    fn attach_thread_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool {
        unsafe { AttachThreadInput(from, to, attach).as_bool() }
    }

    fn bring_to_top(&self, window: WindowRef) -> bool {
        unsafe {
            SetWindowPos(
                to_hwnd(window.raw()),
                HWND_TOP,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_SHOWWINDOW,
            )
            .is_ok()
        }
    }

    fn set_foreground(&self, window: WindowRef) -> bool {
        unsafe { SetForegroundWindow(to_hwnd(window.raw())).as_bool() }
    }

    fn window_text(&self, window: WindowRef) -> Option<String> {
        let hwnd = to_hwnd(window.raw());
        unsafe {
            let length = GetWindowTextLengthW(hwnd);
            if length <= 0 {
                return None;
            }

            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            if copied <= 0 {
                return None;
            }
            Some(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }
}

fn is_key_down(key: VIRTUAL_KEY) -> bool {
    // High bit set = key is down right now
    unsafe { GetAsyncKeyState(key.0 as i32) < 0 }
}

impl KeyStatePort for Win32Desktop {
    fn is_down(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::LeftWin => is_key_down(VK_LWIN),
            ModifierKey::RightWin => is_key_down(VK_RWIN),
            ModifierKey::Shift => is_key_down(VK_SHIFT),
        }
    }
}
