//! Win32 message loop

use tracing::error;
use windows::core::Error;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, TranslateMessage, MSG,
};

/// Pump messages until `WM_QUIT`; returns the quit code
///
/// The keyboard hook procedure runs inside `GetMessageW`, so this loop
/// must keep running for the hook to stay alive.
pub fn run_message_loop() -> i32 {
    unsafe {
        let mut msg = MSG::default();
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 == -1 {
                error!("GetMessageW failed: {}", Error::from_win32());
                return 1;
            }
            if ret.0 == 0 {
                break;
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        msg.wParam.0 as i32
    }
}
