//! KeyStatePort - physical key state sampling

use crate::domain::value_objects::ModifierKey;

/// Port interface for asking whether a modifier key is held right now
pub trait KeyStatePort {
    fn is_down(&self, key: ModifierKey) -> bool;
}
