//! Single-instance guard

use windows::core::w;
use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, HANDLE};
use windows::Win32::System::Threading::{CreateMutexW, ReleaseMutex};

use crate::domain::errors::QuickSwitchError;

/// Holds the named mutex for the life of the process
pub struct SingleInstance {
    handle: HANDLE,
}

impl SingleInstance {
    /// Fails with `AlreadyRunning` if another process holds the mutex
    pub fn acquire() -> Result<Self, QuickSwitchError> {
        unsafe {
            let handle = CreateMutexW(None, true, w!("Local\\QuickSwitch.SingleInstance"))?;
            if GetLastError() == ERROR_ALREADY_EXISTS {
                let _ = CloseHandle(handle);
                return Err(QuickSwitchError::AlreadyRunning);
            }
            Ok(Self { handle })
        }
    }
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        unsafe {
            let _ = ReleaseMutex(self.handle);
            let _ = CloseHandle(self.handle);
        }
    }
}
