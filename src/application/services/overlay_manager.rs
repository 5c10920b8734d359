//! OverlayManager - transient confirmation popups
//!
//! At most one overlay stays on screen. `show` destroys every tracked
//! overlay before recording the new one, and each overlay gets a deferred
//! close request after its lifetime. The close itself runs back on the
//! window-owning thread through `on_close_requested`.
//!
//! The tracked set is the only state shared with the timer service and is
//! guarded by a single lock that is never held across a sleep.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{
    FontSpec, OverlayCloser, OverlayNotifier, OverlaySpec, OverlaySurface, Scheduler, TextExtent,
};
use crate::domain::entities::{OverlayId, OverlayInstance};
use crate::domain::value_objects::Rgb;
use crate::shared::config::OverlayConfig;

/// Fixed presentation of every overlay
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub font: FontSpec,
    /// Space between text and border on every side
    pub padding: i32,
    /// Distance from the screen's top-left corner
    pub offset: i32,
    pub lifetime: Duration,
    pub opacity: u8,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&OverlayConfig::default())
    }
}

impl From<&OverlayConfig> for OverlayStyle {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            font: FontSpec {
                family: config.font_family.clone(),
                size: config.font_size,
            },
            padding: config.padding,
            offset: config.offset,
            lifetime: Duration::from_millis(config.lifetime_ms),
            opacity: config.opacity,
            background: config.background,
            foreground: config.foreground,
        }
    }
}

impl OverlayStyle {
    /// Place a popup that fits `extent` plus padding
    pub fn layout(&self, text: &str, extent: TextExtent) -> OverlaySpec {
        OverlaySpec {
            text: text.to_string(),
            font: self.font.clone(),
            x: self.offset,
            y: self.offset,
            width: extent.width + 2 * self.padding,
            height: extent.height + 2 * self.padding,
            opacity: self.opacity,
            background: self.background,
            foreground: self.foreground,
        }
    }
}

/// Owns every live overlay and enforces the single-live invariant
pub struct OverlayManager<S: OverlaySurface, T: Scheduler> {
    surface: S,
    scheduler: T,
    style: OverlayStyle,
    live: Arc<Mutex<Vec<OverlayInstance>>>,
}

impl<S: OverlaySurface, T: Scheduler> OverlayManager<S, T> {
    pub fn new(surface: S, scheduler: T, style: OverlayStyle) -> Self {
        Self {
            surface,
            scheduler,
            style,
            live: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Display `text`, replacing any overlay still on screen
    ///
    /// Failures are logged and swallowed; the overlay is only a courtesy.
    pub fn show(&self, text: &str) -> Option<OverlayId> {
        // Measured once, with the same font the paint handler uses
        let extent = match self.surface.measure_text(text, &self.style.font) {
            Ok(extent) => extent,
            Err(e) => {
                warn!("Skipping overlay: {}", e);
                return None;
            }
        };

        let spec = self.style.layout(text, extent);
        let id = match self.surface.create(&spec) {
            Ok(id) => id,
            Err(e) => {
                warn!("Skipping overlay: {}", e);
                return None;
            }
        };

        {
            let mut live = self.live.lock();
            for old in live.drain(..) {
                debug!(id = old.id.0, "Destroying superseded overlay");
                self.surface.destroy(old.id);
            }
            live.push(OverlayInstance::new(id, text, self.style.lifetime));
        }

        let tracked = Arc::clone(&self.live);
        let closer = self.surface.closer();
        self.scheduler.schedule(
            self.style.lifetime,
            Box::new(move || {
                // Superseded overlays are already gone; nothing to close
                let still_live = tracked.lock().iter().any(|o| o.id == id);
                if still_live {
                    closer.request_close(id);
                }
            }),
        );

        debug!(id = id.0, width = spec.width, height = spec.height, "Overlay shown");
        Some(id)
    }

    /// Handle a close request delivered to an overlay window
    ///
    /// Returns `false` when the overlay is no longer tracked, in which case
    /// nothing is destroyed.
    pub fn on_close_requested(&self, id: OverlayId) -> bool {
        let mut live = self.live.lock();
        match live.iter().position(|o| o.id == id) {
            Some(index) => {
                live.remove(index);
                self.surface.destroy(id);
                debug!(id = id.0, "Overlay expired");
                true
            }
            None => false,
        }
    }

    /// Number of tracked overlays (0 or 1)
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }

    /// Snapshot of the tracked overlays
    pub fn live_overlays(&self) -> Vec<OverlayInstance> {
        self.live.lock().clone()
    }

    /// Destroy every tracked overlay (shutdown)
    pub fn destroy_all(&self) {
        let mut live = self.live.lock();
        for overlay in live.drain(..) {
            self.surface.destroy(overlay.id);
        }
    }
}

impl<S: OverlaySurface, T: Scheduler> OverlayNotifier for OverlayManager<S, T> {
    fn notify(&self, text: String) {
        self.show(&text);
    }
}

impl<S: OverlaySurface, T: Scheduler> Drop for OverlayManager<S, T> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
