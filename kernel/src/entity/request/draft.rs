use destructure::Destructure;
use vodca::References;

use crate::entity::{CreatedAt, ItemRequest, ItemRequestDescription, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct ItemRequestDraft {
    description: ItemRequestDescription,
    requestor_id: UserId,
    created: CreatedAt<ItemRequest>,
}

impl ItemRequestDraft {
    pub fn new(
        description: ItemRequestDescription,
        requestor_id: UserId,
        created: CreatedAt<ItemRequest>,
    ) -> Self {
        Self {
            description,
            requestor_id,
            created,
        }
    }
}
