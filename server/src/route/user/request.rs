use application::transfer::{CreateUserDto, DeleteUserDto, GetUserDto, UpdateUserDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::required;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: i64,
}

impl GetRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: i64,
}

impl DeleteRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateUserDto;
    type Error = Report<KernelError>;
    fn emit(&self, CreateRequest { name, email }: CreateRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateUserDto {
            name: required("User name", name)?,
            email: required("User email", email)?,
        })
    }
}

impl Intake<()> for Transformer {
    type To = ();
    fn emit(&self, input: ()) -> Self::To {
        input
    }
}

impl Intake<(i64, UpdateRequest)> for Transformer {
    type To = UpdateUserDto;
    fn emit(&self, (id, UpdateRequest { name, email }): (i64, UpdateRequest)) -> Self::To {
        UpdateUserDto { id, name, email }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteUserDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteUserDto { id: input.id }
    }
}
