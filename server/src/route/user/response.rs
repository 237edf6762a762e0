use application::transfer::UserDto;
use axum::Json;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: i64,
    name: String,
    email: String,
}

impl From<UserDto> for UserResponse {
    fn from(UserDto { id, name, email }: UserDto) -> Self {
        Self { id, name, email }
    }
}

pub struct Presenter;

impl Exhaust<()> for Presenter {
    type To = ();
    fn emit(&self, output: ()) -> Self::To {
        output
    }
}

impl Exhaust<UserDto> for Presenter {
    type To = Json<UserResponse>;
    fn emit(&self, output: UserDto) -> Self::To {
        Json(UserResponse::from(output))
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, output: Vec<UserDto>) -> Self::To {
        Json(output.into_iter().map(UserResponse::from).collect())
    }
}
