//! OverlayPort - interface for creating and tearing down overlay popups
//!
//! The overlay manager owns the policy (sizing, single-live invariant,
//! lifetime); the surface only knows how to measure, create and destroy.

use crate::domain::entities::OverlayId;
use crate::domain::errors::QuickSwitchError;
use crate::domain::value_objects::Rgb;

/// Text extent in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

/// Font used both for measuring and painting an overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    /// Cell height in pixels
    pub size: i32,
}

/// Everything the surface needs to create one overlay
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySpec {
    pub text: String,
    pub font: FontSpec,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Layered-window alpha (255 = opaque)
    pub opacity: u8,
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Posts a close request to an overlay's owning thread
///
/// Called from the timer service, never on the window-owning thread.
pub trait OverlayCloser: Send + Sync + 'static {
    fn request_close(&self, id: OverlayId);
}

/// Port interface for overlay windows (window-owning thread only)
pub trait OverlaySurface {
    type Closer: OverlayCloser;

    /// Measure single-line text at the given font
    fn measure_text(&self, text: &str, font: &FontSpec) -> Result<TextExtent, QuickSwitchError>;

    /// Create and show an overlay window
    fn create(&self, spec: &OverlaySpec) -> Result<OverlayId, QuickSwitchError>;

    /// Destroy an overlay window synchronously
    fn destroy(&self, id: OverlayId);

    /// A handle the timer service can use to request closes
    fn closer(&self) -> Self::Closer;
}

/// Receives confirmation text from the input interceptor
///
/// Implementations must return immediately; the hook thread calls this.
pub trait OverlayNotifier {
    fn notify(&self, text: String);
}
