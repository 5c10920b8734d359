//! GDI overlay windows
//!
//! Layered, topmost, click-through popups that paint one centered line of
//! text. Each window keeps its own copy of what to paint in `GWLP_USERDATA`.

use tracing::{debug, warn};
use windows::core::{w, Error, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateFontIndirectW, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint,
    FillRect, GetDC, GetTextExtentPoint32W, InvalidateRect, ReleaseDC, SelectObject, SetBkMode,
    SetTextColor, ANTIALIASED_QUALITY, CLIP_DEFAULT_PRECIS, DEFAULT_CHARSET, DT_CENTER,
    DT_SINGLELINE, DT_VCENTER, HFONT, HGDIOBJ, LOGFONTW, OUT_TT_PRECIS, PAINTSTRUCT,
    TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetClientRect, GetWindowLongPtrW,
    PostMessageW, SetLayeredWindowAttributes, SetWindowLongPtrW, ShowWindow, GWLP_USERDATA,
    LWA_ALPHA, SW_SHOWNOACTIVATE, WM_CLOSE, WM_ERASEBKGND, WM_NCDESTROY, WM_PAINT,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT,
    WS_POPUP,
};

use super::desktop::to_hwnd;
use super::window::{dispatch_host_event, Dispatch};
use crate::application::ports::{
    FontSpec, HostEvent, OverlayCloser, OverlaySpec, OverlaySurface, TextExtent,
};
use crate::domain::entities::OverlayId;
use crate::domain::errors::QuickSwitchError;
use crate::domain::value_objects::Rgb;

pub(crate) const OVERLAY_CLASS_NAME: PCWSTR = w!("QuickSwitchOverlayClass");

/// What an overlay window paints
struct OverlayContent {
    text: Vec<u16>,
    font: FontSpec,
    background: Rgb,
    foreground: Rgb,
}

fn create_font(font: &FontSpec) -> HFONT {
    let mut face = [0u16; 32];
    // Leave room for the terminating nul
    for (dst, src) in face.iter_mut().take(31).zip(font.family.encode_utf16()) {
        *dst = src;
    }

    let logfont = LOGFONTW {
        lfHeight: font.size,
        lfWeight: 400, // FW_NORMAL
        lfCharSet: DEFAULT_CHARSET,
        lfOutPrecision: OUT_TT_PRECIS,
        lfClipPrecision: CLIP_DEFAULT_PRECIS,
        lfQuality: ANTIALIASED_QUALITY,
        lfFaceName: face,
        ..Default::default()
    };
    unsafe { CreateFontIndirectW(&logfont) }
}

/// Overlay surface backed by real popup windows
#[derive(Clone, Copy, Debug, Default)]
pub struct GdiOverlaySurface;

impl OverlaySurface for GdiOverlaySurface {
    type Closer = PostedCloser;

    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<TextExtent, QuickSwitchError> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        unsafe {
            // Throwaway screen DC
            let hdc = GetDC(None);
            if hdc.0.is_null() {
                return Err(QuickSwitchError::TextMeasure(
                    "no screen device context".to_string(),
                ));
            }

            let hfont = create_font(font);
            let previous = SelectObject(hdc, HGDIOBJ(hfont.0));
            let mut size = SIZE::default();
            let measured = GetTextExtentPoint32W(hdc, &wide, &mut size).as_bool();
            let failure = (!measured).then(Error::from_win32);

            SelectObject(hdc, previous);
            let _ = DeleteObject(HGDIOBJ(hfont.0));
            ReleaseDC(None, hdc);

            match failure {
                Some(e) => Err(QuickSwitchError::TextMeasure(e.to_string())),
                None => Ok(TextExtent {
                    width: size.cx,
                    height: size.cy,
                }),
            }
        }
    }

    fn create(&self, spec: &OverlaySpec) -> Result<OverlayId, QuickSwitchError> {
        unsafe {
            let hinstance = GetModuleHandleW(None)?;

            let hwnd = CreateWindowExW(
                // Topmost, click-through, no taskbar button, never takes focus
                WS_EX_TOPMOST | WS_EX_TRANSPARENT | WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE,
                OVERLAY_CLASS_NAME,
                w!("Quick Switch Overlay"),
                WS_POPUP,
                spec.x,
                spec.y,
                spec.width,
                spec.height,
                None,
                None,
                hinstance,
                None,
            )
            .map_err(|e| QuickSwitchError::WindowCreation(e.to_string()))?;

            let content = Box::new(OverlayContent {
                text: spec.text.encode_utf16().collect(),
                font: spec.font.clone(),
                background: spec.background,
                foreground: spec.foreground,
            });
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(content) as isize);

            let _ = SetLayeredWindowAttributes(hwnd, None, spec.opacity, LWA_ALPHA);
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            let _ = InvalidateRect(hwnd, None, true);

            Ok(OverlayId(hwnd.0 as isize))
        }
    }

    fn destroy(&self, id: OverlayId) {
        unsafe {
            if let Err(e) = DestroyWindow(to_hwnd(id.0)) {
                debug!(overlay = id.0, "DestroyWindow failed: {}", e);
            }
        }
    }

    fn closer(&self) -> PostedCloser {
        PostedCloser
    }
}

/// Posts `WM_CLOSE` to an overlay from any thread
#[derive(Clone, Copy, Debug, Default)]
pub struct PostedCloser;

impl OverlayCloser for PostedCloser {
    fn request_close(&self, id: OverlayId) {
        let posted = unsafe { PostMessageW(to_hwnd(id.0), WM_CLOSE, WPARAM(0), LPARAM(0)) };
        if let Err(e) = posted {
            debug!(overlay = id.0, "Close request not posted: {}", e);
        }
    }
}

unsafe fn paint(hwnd: HWND) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let content = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const OverlayContent;
    if let Some(content) = content.as_ref() {
        let brush = CreateSolidBrush(COLORREF(content.background.to_colorref()));
        FillRect(hdc, &ps.rcPaint, brush);
        let _ = DeleteObject(HGDIOBJ(brush.0));

        SetBkMode(hdc, TRANSPARENT);
        SetTextColor(hdc, COLORREF(content.foreground.to_colorref()));

        let hfont = create_font(&content.font);
        let previous = SelectObject(hdc, HGDIOBJ(hfont.0));

        let mut rect = RECT::default();
        let _ = GetClientRect(hwnd, &mut rect);
        let mut text = content.text.clone();
        DrawTextW(hdc, &mut text, &mut rect, DT_CENTER | DT_VCENTER | DT_SINGLELINE);

        SelectObject(hdc, previous);
        let _ = DeleteObject(HGDIOBJ(hfont.0));
    }

    let _ = EndPaint(hwnd, &ps);
}

pub(crate) unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        WM_ERASEBKGND => LRESULT(1),
        WM_CLOSE => {
            // The manager decides; it destroys only tracked overlays
            match dispatch_host_event(HostEvent::OverlayCloseRequested(OverlayId(hwnd.0 as isize))) {
                Dispatch::Delivered => {}
                Dispatch::Busy(_) => {
                    let _ = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
                }
                Dispatch::NoHandler(_) => {
                    warn!(overlay = hwnd.0 as isize, "Close request with no manager");
                    let _ = DestroyWindow(hwnd);
                }
            }
            LRESULT(0)
        }
        WM_NCDESTROY => {
            let content = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut OverlayContent;
            if !content.is_null() {
                drop(Box::from_raw(content));
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
