mod draft;
mod id;
mod text;

pub use self::{draft::*, id::*, text::*};
use destructure::Destructure;
use vodca::References;

use crate::entity::{CreatedAt, ItemId, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Comment {
    id: CommentId,
    text: CommentText,
    item_id: ItemId,
    author_id: UserId,
    created: CreatedAt<Comment>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        text: CommentText,
        item_id: ItemId,
        author_id: UserId,
        created: CreatedAt<Comment>,
    ) -> Self {
        Self {
            id,
            text,
            item_id,
            author_id,
            created,
        }
    }
}
