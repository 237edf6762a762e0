use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ItemRequestId(i64);

impl ItemRequestId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
