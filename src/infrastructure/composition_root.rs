//! CompositionRoot - the process-scoped context
//!
//! Wires the platform ports into the interceptor, the overlay manager and
//! the timer service. The platform layer takes the two handlers apart and
//! registers them with its callbacks; the root keeps the timer service so
//! shutdown can stop it deterministically.

use std::sync::Arc;

use tracing::info;

use crate::adapters::controllers::{HostController, InputInterceptor};
use crate::application::ports::{KeyStatePort, OverlayNotifier, OverlaySurface, WindowPort};
use crate::application::services::{OverlayManager, OverlayStyle, TimerService};
use crate::domain::errors::QuickSwitchError;
use crate::shared::config::Config;

/// Platform implementations handed to the root
pub struct PlatformPorts<W, K, N, S> {
    pub windows: W,
    pub keys: K,
    pub notifier: N,
    pub surface: S,
}

/// Application composition root - owns all dependencies
pub struct CompositionRoot<W, K, N, S>
where
    W: WindowPort,
    K: KeyStatePort,
    N: OverlayNotifier,
    S: OverlaySurface,
{
    pub interceptor: InputInterceptor<W, K, N>,
    pub host: HostController<S, Arc<TimerService>>,
    pub timers: Arc<TimerService>,
}

impl<W, K, N, S> CompositionRoot<W, K, N, S>
where
    W: WindowPort,
    K: KeyStatePort,
    N: OverlayNotifier,
    S: OverlaySurface,
{
    /// Build every component; fails only if the timer thread cannot start
    pub fn new(config: &Config, ports: PlatformPorts<W, K, N, S>) -> Result<Self, QuickSwitchError> {
        let timers = Arc::new(TimerService::start()?);

        let style = OverlayStyle::from(&config.overlay);
        info!(
            font = %style.font.family,
            size = style.font.size,
            lifetime_ms = style.lifetime.as_millis() as u64,
            "Overlay style"
        );
        let overlays = OverlayManager::new(ports.surface, Arc::clone(&timers), style);

        Ok(Self {
            interceptor: InputInterceptor::new(ports.windows, ports.keys, ports.notifier),
            host: HostController::new(overlays),
            timers,
        })
    }

    /// Split into the keyboard handler, the host handler and the timers
    pub fn into_parts(
        self,
    ) -> (
        InputInterceptor<W, K, N>,
        HostController<S, Arc<TimerService>>,
        Arc<TimerService>,
    ) {
        (self.interceptor, self.host, self.timers)
    }
}
