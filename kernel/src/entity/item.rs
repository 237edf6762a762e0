mod available;
mod description;
mod draft;
mod id;
mod name;

pub use self::{available::*, description::*, draft::*, id::*, name::*};
use destructure::{Destructure, Mutation};
use vodca::References;

use crate::entity::{ItemRequestId, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Item {
    id: ItemId,
    name: ItemName,
    description: ItemDescription,
    available: ItemAvailable,
    owner_id: UserId,
    request_id: Option<ItemRequestId>,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: ItemName,
        description: ItemDescription,
        available: ItemAvailable,
        owner_id: UserId,
        request_id: Option<ItemRequestId>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}
