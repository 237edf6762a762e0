use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct ItemRequestDescription(String);

impl ItemRequestDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}
