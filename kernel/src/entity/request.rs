mod description;
mod draft;
mod id;

pub use self::{description::*, draft::*, id::*};
use destructure::Destructure;
use vodca::References;

use crate::entity::{CreatedAt, UserId};

/// A user's public ask for an item nobody has listed yet.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct ItemRequest {
    id: ItemRequestId,
    description: ItemRequestDescription,
    requestor_id: UserId,
    created: CreatedAt<ItemRequest>,
}

impl ItemRequest {
    pub fn new(
        id: ItemRequestId,
        description: ItemRequestDescription,
        requestor_id: UserId,
        created: CreatedAt<ItemRequest>,
    ) -> Self {
        Self {
            id,
            description,
            requestor_id,
            created,
        }
    }
}
