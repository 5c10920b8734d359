//! Domain Entities - Core business objects

pub mod binding_table;
pub mod overlay;

pub use binding_table::BindingTable;
pub use overlay::{OverlayId, OverlayInstance};
