//! HostController - routes window-thread events to the overlay manager

use crate::application::ports::{HostEvent, HostEventHandler, OverlaySurface, Scheduler};
use crate::application::services::OverlayManager;

/// Handler registered with the host window
pub struct HostController<S: OverlaySurface, T: Scheduler> {
    overlays: OverlayManager<S, T>,
}

impl<S: OverlaySurface, T: Scheduler> HostController<S, T> {
    pub fn new(overlays: OverlayManager<S, T>) -> Self {
        Self { overlays }
    }

    pub fn overlays(&self) -> &OverlayManager<S, T> {
        &self.overlays
    }
}

impl<S: OverlaySurface, T: Scheduler> HostEventHandler for HostController<S, T> {
    fn on_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ShowOverlay(text) => {
                self.overlays.show(&text);
            }
            HostEvent::OverlayCloseRequested(id) => {
                self.overlays.on_close_requested(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::OverlayStyle;
    use crate::testing::{FakeSurface, ManualScheduler};

    #[test]
    fn test_show_then_close_round_trip() {
        let surface = FakeSurface::new();
        let scheduler = ManualScheduler::new();
        let mut controller = HostController::new(OverlayManager::new(
            surface.clone(),
            scheduler.clone(),
            OverlayStyle::default(),
        ));

        controller.on_host_event(HostEvent::ShowOverlay("Window 'A' bound to WIN+1".into()));
        assert_eq!(controller.overlays().live_count(), 1);

        scheduler.run_all();
        for id in surface.close_requests() {
            controller.on_host_event(HostEvent::OverlayCloseRequested(id));
        }
        assert_eq!(controller.overlays().live_count(), 0);
        assert!(surface.live_windows().is_empty());
    }
}
