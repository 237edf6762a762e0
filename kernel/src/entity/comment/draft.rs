use destructure::Destructure;
use vodca::References;

use crate::entity::{Comment, CommentText, CreatedAt, ItemId, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CommentDraft {
    text: CommentText,
    item_id: ItemId,
    author_id: UserId,
    created: CreatedAt<Comment>,
}

impl CommentDraft {
    pub fn new(
        text: CommentText,
        item_id: ItemId,
        author_id: UserId,
        created: CreatedAt<Comment>,
    ) -> Self {
        Self {
            text,
            item_id,
            author_id,
            created,
        }
    }
}
