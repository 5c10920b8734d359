//! Infrastructure Layer - process wiring

pub mod composition_root;

pub use composition_root::{CompositionRoot, PlatformPorts};
