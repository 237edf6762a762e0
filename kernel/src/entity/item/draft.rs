use destructure::Destructure;
use vodca::References;

use crate::entity::{ItemAvailable, ItemDescription, ItemName, ItemRequestId, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct ItemDraft {
    name: ItemName,
    description: ItemDescription,
    available: ItemAvailable,
    owner_id: UserId,
    request_id: Option<ItemRequestId>,
}

impl ItemDraft {
    pub fn new(
        name: ItemName,
        description: ItemDescription,
        available: ItemAvailable,
        owner_id: UserId,
        request_id: Option<ItemRequestId>,
    ) -> Self {
        Self {
            name,
            description,
            available,
            owner_id,
            request_id,
        }
    }
}
