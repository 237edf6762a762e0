use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ItemAvailable(bool);

impl ItemAvailable {
    pub fn new(available: impl Into<bool>) -> Self {
        Self(available.into())
    }
}
