use destructure::Destructure;
use vodca::References;

use crate::entity::{UserEmail, UserName};

/// A user that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct UserDraft {
    name: UserName,
    email: UserEmail,
}

impl UserDraft {
    pub fn new(name: UserName, email: UserEmail) -> Self {
        Self { name, email }
    }
}
