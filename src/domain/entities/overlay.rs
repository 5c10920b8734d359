//! Overlay entity - one transient confirmation popup

use std::time::{Duration, Instant};

/// Identity of a live overlay window (its raw handle)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(pub isize);

/// A tracked overlay instance
#[derive(Clone, Debug)]
pub struct OverlayInstance {
    pub id: OverlayId,
    /// Text copied at creation
    pub text: String,
    pub created_at: Instant,
    pub lifetime: Duration,
}

impl OverlayInstance {
    pub fn new(id: OverlayId, text: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: Instant::now(),
            lifetime,
        }
    }
}
