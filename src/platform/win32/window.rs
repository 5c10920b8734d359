//! Host window, window classes and event dispatch
//!
//! The host window is never shown. It owns the tray icon and receives the
//! deferred requests the hook posts so the hook procedure can return at once.

use std::cell::RefCell;

use tracing::{debug, info, warn};
use windows::core::{w, Error, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::desktop::to_hwnd;
use super::overlay::{overlay_wnd_proc, OVERLAY_CLASS_NAME};
use super::tray::on_tray_message;
use crate::application::ports::{HostEvent, HostEventHandler, OverlayNotifier};
use crate::domain::errors::QuickSwitchError;

/// Deferred overlay request; `LPARAM` carries a `Box<String>`
pub const WM_APP_SHOW_OVERLAY: u32 = WM_APP + 1;
/// Tray icon callback message
pub const WM_APP_TRAY: u32 = WM_APP + 2;

const HOST_CLASS_NAME: PCWSTR = w!("QuickSwitchHostClass");

thread_local! {
    static HOST_HANDLER: RefCell<Option<Box<dyn HostEventHandler>>> = RefCell::new(None);
}

/// Register the handler for host and overlay window events
pub fn set_host_handler<H: HostEventHandler + 'static>(handler: H) {
    HOST_HANDLER.with(|slot| *slot.borrow_mut() = Some(Box::new(handler)));
}

/// Remove and drop the registered handler
pub fn clear_host_handler() {
    // Dropping the handler destroys overlay windows, whose procedures must
    // not find the slot borrowed
    let handler = HOST_HANDLER.with(|slot| slot.borrow_mut().take());
    drop(handler);
}

/// Outcome of handing an event to the host handler
pub(crate) enum Dispatch {
    Delivered,
    /// The handler is running further up the stack
    Busy(HostEvent),
    NoHandler(HostEvent),
}

pub(crate) fn dispatch_host_event(event: HostEvent) -> Dispatch {
    HOST_HANDLER.with(|slot| match slot.try_borrow_mut() {
        Ok(mut handler) => match handler.as_mut() {
            Some(handler) => {
                handler.on_host_event(event);
                Dispatch::Delivered
            }
            None => Dispatch::NoHandler(event),
        },
        Err(_) => Dispatch::Busy(event),
    })
}

/// Reclaim the text `PostedNotifier` leaked into a posted message
///
/// Must be called exactly once per `WM_APP_SHOW_OVERLAY` message.
unsafe fn take_overlay_text(lparam: LPARAM) -> Option<String> {
    (lparam.0 != 0).then(|| *Box::from_raw(lparam.0 as *mut String))
}

/// Free overlay requests the message loop never dispatched
///
/// Call after the loop has exited; returns how many were dropped.
pub fn discard_overlay_requests(host: HWND) -> usize {
    let mut discarded = 0;
    let mut msg = MSG::default();
    unsafe {
        while PeekMessageW(
            &mut msg,
            host,
            WM_APP_SHOW_OVERLAY,
            WM_APP_SHOW_OVERLAY,
            PM_REMOVE,
        )
        .as_bool()
        {
            drop(take_overlay_text(msg.lParam));
            discarded += 1;
        }
    }
    discarded
}

unsafe extern "system" fn host_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_APP_SHOW_OVERLAY => {
            if let Some(text) = take_overlay_text(lparam) {
                match dispatch_host_event(HostEvent::ShowOverlay(text)) {
                    Dispatch::Delivered => {}
                    Dispatch::Busy(event) | Dispatch::NoHandler(event) => {
                        warn!(?event, "Dropping overlay request");
                    }
                }
            }
            LRESULT(0)
        }
        WM_APP_TRAY => {
            on_tray_message(hwnd, lparam);
            LRESULT(0)
        }
        WM_DESTROY => {
            info!("Host window destroyed - posting quit message");
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn register_class(
    name: PCWSTR,
    label: &str,
    wnd_proc: unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT,
) -> Result<(), QuickSwitchError> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            hInstance: hinstance.into(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            lpszClassName: name,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            return Err(QuickSwitchError::ClassRegistration {
                class: label.to_string(),
                reason: Error::from_win32().to_string(),
            });
        }
    }
    debug!(class = label, "Registered window class");
    Ok(())
}

/// Register the host and overlay window classes (call once at startup)
pub fn register_window_classes() -> Result<(), QuickSwitchError> {
    register_class(HOST_CLASS_NAME, "QuickSwitchHostClass", host_wnd_proc)?;
    register_class(OVERLAY_CLASS_NAME, "QuickSwitchOverlayClass", overlay_wnd_proc)
}

/// Unregister both window classes (call at shutdown)
pub fn unregister_window_classes() {
    unsafe {
        if let Ok(hinstance) = GetModuleHandleW(None) {
            let _ = UnregisterClassW(HOST_CLASS_NAME, hinstance);
            let _ = UnregisterClassW(OVERLAY_CLASS_NAME, hinstance);
        }
    }
}

/// Create the hidden host window
pub fn create_host_window() -> Result<HWND, QuickSwitchError> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        CreateWindowExW(
            WS_EX_TOOLWINDOW,
            HOST_CLASS_NAME,
            w!("Quick Switch"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            hinstance,
            None,
        )
        .map_err(|e| QuickSwitchError::WindowCreation(e.to_string()))
    }
}

/// Destroy a window owned by this thread
pub fn destroy_window(hwnd: HWND) {
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}

/// Show a blocking error dialog (startup failures only)
pub fn show_fatal_error(message: &str) {
    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(message),
            w!("Quick Switch"),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// Hands confirmation text to the host window's message queue
#[derive(Clone, Copy, Debug)]
pub struct PostedNotifier {
    host: isize,
}

impl PostedNotifier {
    pub fn new(host: HWND) -> Self {
        Self {
            host: host.0 as isize,
        }
    }
}

impl OverlayNotifier for PostedNotifier {
    fn notify(&self, text: String) {
        let payload = Box::into_raw(Box::new(text));
        let posted = unsafe {
            PostMessageW(
                to_hwnd(self.host),
                WM_APP_SHOW_OVERLAY,
                WPARAM(0),
                LPARAM(payload as isize),
            )
        };
        if let Err(e) = posted {
            // Never delivered, so still ours to free
            drop(unsafe { Box::from_raw(payload) });
            warn!("Could not post overlay request: {}", e);
        }
    }
}
