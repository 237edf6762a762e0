use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}
