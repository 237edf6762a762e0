use application::transfer::{
    CreateItemRequestDto, DeleteItemRequestDto, GetItemRequestDto, GetOtherItemRequestsDto,
    GetOwnItemRequestsDto,
};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::required;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    from: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug)]
pub struct TargetRequest {
    id: i64,
    user_id: i64,
}

impl TargetRequest {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self { id, user_id }
    }
}

pub struct Transformer;

impl TryIntake<(i64, CreateRequest)> for Transformer {
    type To = CreateItemRequestDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user_id, input): (i64, CreateRequest)) -> Result<Self::To, Self::Error> {
        Ok(CreateItemRequestDto {
            user_id,
            description: required("Request description", input.description)?,
        })
    }
}

impl Intake<i64> for Transformer {
    type To = GetOwnItemRequestsDto;
    fn emit(&self, user_id: i64) -> Self::To {
        GetOwnItemRequestsDto { user_id }
    }
}

impl Intake<(i64, PageQuery)> for Transformer {
    type To = GetOtherItemRequestsDto;
    fn emit(&self, (user_id, PageQuery { from, size }): (i64, PageQuery)) -> Self::To {
        GetOtherItemRequestsDto {
            user_id,
            from,
            size,
        }
    }
}

impl Intake<TargetRequest> for Transformer {
    type To = GetItemRequestDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        GetItemRequestDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}

pub struct DeleteTransformer;

impl Intake<TargetRequest> for DeleteTransformer {
    type To = DeleteItemRequestDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        DeleteItemRequestDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}
