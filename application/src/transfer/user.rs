use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser { id, name, email } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

pub struct GetUserDto {
    pub id: i64,
}

pub struct CreateUserDto {
    pub name: String,
    pub email: String,
}

pub struct UpdateUserDto {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct DeleteUserDto {
    pub id: i64,
}
