mod draft;
mod email;
mod id;
mod name;

pub use self::{draft::*, email::*, id::*, name::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, Mutation, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: UserEmail) -> Self {
        Self { id, name, email }
    }
}
