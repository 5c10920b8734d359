//! SwitchEngine - forces a remembered window into the foreground
//!
//! Windows only lets a thread that is involved with the current foreground
//! window change it. The engine borrows that right by attaching its input
//! state to the foreground window's thread for the duration of the switch.

use tracing::{debug, warn};

use crate::application::ports::{ThreadId, WindowPort};
use crate::domain::errors::SwitchError;
use crate::domain::value_objects::WindowRef;

/// Brings windows to the foreground through a `WindowPort`
pub struct SwitchEngine<W: WindowPort> {
    windows: W,
}

impl<W: WindowPort> SwitchEngine<W> {
    pub fn new(windows: W) -> Self {
        Self { windows }
    }

    /// The port this engine drives
    pub fn windows(&self) -> &W {
        &self.windows
    }

    /// Make `target` the foreground window
    ///
    /// Best effort: the OS may still refuse under its foreground-lock
    /// policy, which is reported as `SwitchError::Refused`.
    pub fn switch_to(&self, target: Option<WindowRef>) -> Result<WindowRef, SwitchError> {
        let window = target.ok_or(SwitchError::Unbound)?;

        if !self.windows.is_window(window) {
            warn!(%window, "Invalid window handle");
            return Err(SwitchError::InvalidWindow(window));
        }

        if self.windows.is_minimized(window) {
            debug!(%window, "Restoring minimized window");
            self.windows.restore(window);
        }

        let foreground = self.windows.foreground_window();
        let foreground_thread = self.windows.window_thread(foreground);
        let current_thread = self.windows.current_thread();

        let _attachment = InputAttachment::attach(&self.windows, current_thread, foreground_thread);

        self.windows.bring_to_top(window);
        if self.windows.set_foreground(window) {
            Ok(window)
        } else {
            warn!(%window, "Foreground change refused");
            Err(SwitchError::Refused(window))
        }
    }
}

/// Input attachment between two threads, detached on drop
struct InputAttachment<'a, W: WindowPort> {
    windows: &'a W,
    from: ThreadId,
    to: ThreadId,
    attached: bool,
}

impl<'a, W: WindowPort> InputAttachment<'a, W> {
    fn attach(windows: &'a W, from: ThreadId, to: ThreadId) -> Self {
        // Thread 0 means there is no foreground window to borrow from
        let attached = from != to && to != 0 && windows.attach_thread_input(from, to, true);
        if attached {
            debug!(from, to, "Attached thread input");
        }
        Self {
            windows,
            from,
            to,
            attached,
        }
    }
}

impl<W: WindowPort> Drop for InputAttachment<'_, W> {
    fn drop(&mut self) {
        if self.attached {
            self.windows.attach_thread_input(self.from, self.to, false);
        }
    }
}
