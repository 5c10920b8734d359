//! DPI awareness for Windows

use windows::core::Error;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE,
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

/// Enable per-monitor DPI awareness (call early in main)
///
/// Overlay text is measured and drawn in physical pixels, so without this
/// the popup would be bitmap-stretched on scaled displays.
pub fn enable_dpi_awareness() -> Result<(), Error> {
    unsafe {
        // Try V2 first (Windows 10 1703+)
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            return Ok(());
        }
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE).is_ok() {
            return Ok(());
        }
        // System-wide awareness on older systems
        if SetProcessDPIAware().as_bool() {
            Ok(())
        } else {
            Err(Error::from_win32())
        }
    }
}
