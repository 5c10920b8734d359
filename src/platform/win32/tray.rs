//! Notification-area icon with an Exit menu

use tracing::{info, warn};
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, PostQuitMessage,
    SetForegroundWindow, TrackPopupMenu, IDI_APPLICATION, MF_STRING, TPM_NONOTIFY,
    TPM_RETURNCMD, TPM_RIGHTBUTTON, WM_CONTEXTMENU, WM_RBUTTONUP,
};

use super::window::WM_APP_TRAY;
use crate::domain::errors::QuickSwitchError;

const TRAY_ICON_ID: u32 = 1;
const MENU_EXIT: usize = 1001;
const TOOLTIP: &str = "Quick Switch";

fn notify_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

/// The tray icon; removed on drop
pub struct TrayIcon {
    hwnd: HWND,
}

impl TrayIcon {
    /// Add the icon; its callbacks arrive at `host` as `WM_APP_TRAY`
    pub fn add(host: HWND) -> Result<Self, QuickSwitchError> {
        let mut data = notify_data(host);
        data.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        data.uCallbackMessage = WM_APP_TRAY;
        data.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION)? };
        let tip_capacity = data.szTip.len() - 1;
        for (dst, src) in data
            .szTip
            .iter_mut()
            .take(tip_capacity)
            .zip(TOOLTIP.encode_utf16())
        {
            *dst = src;
        }

        if !unsafe { Shell_NotifyIconW(NIM_ADD, &data) }.as_bool() {
            return Err(QuickSwitchError::WindowCreation(
                "tray icon could not be added".to_string(),
            ));
        }
        info!("Tray icon added");
        Ok(Self { hwnd: host })
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        let data = notify_data(self.hwnd);
        if !unsafe { Shell_NotifyIconW(NIM_DELETE, &data) }.as_bool() {
            warn!("Tray icon could not be removed");
        }
    }
}

/// Handle a `WM_APP_TRAY` callback on the host window
pub(crate) fn on_tray_message(hwnd: HWND, lparam: LPARAM) {
    let event = lparam.0 as u32;
    if event != WM_RBUTTONUP && event != WM_CONTEXTMENU {
        return;
    }

    if show_menu(hwnd) == Some(MENU_EXIT) {
        info!("Exit selected from tray menu");
        unsafe { PostQuitMessage(0) };
    }
}

fn show_menu(hwnd: HWND) -> Option<usize> {
    unsafe {
        let mut point = POINT::default();
        GetCursorPos(&mut point).ok()?;

        let menu = CreatePopupMenu().ok()?;
        let _ = AppendMenuW(menu, MF_STRING, MENU_EXIT, w!("Exit"));

        // Required for the menu to close when clicking elsewhere
        let _ = SetForegroundWindow(hwnd);
        let chosen = TrackPopupMenu(
            menu,
            TPM_RETURNCMD | TPM_NONOTIFY | TPM_RIGHTBUTTON,
            point.x,
            point.y,
            0,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);

        (chosen.0 > 0).then_some(chosen.0 as usize)
    }
}
