use application::transfer::{
    CreateCommentDto, CreateItemDto, DeleteItemDto, GetItemDto, GetOwnItemsDto, SearchItemDto,
    UpdateItemDto,
};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::route::required;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    name: Option<String>,
    description: Option<String>,
    available: Option<bool>,
    request_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    description: Option<String>,
    available: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    text: Option<String>,
}

/// An item addressed by id on behalf of the caller.
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
    type To = CreateItemDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user_id, input): (i64, CreateRequest)) -> Result<Self::To, Self::Error> {
        Ok(CreateItemDto {
            user_id,
            name: required("Item name", input.name)?,
            description: required("Item description", input.description)?,
            available: required("Item availability", input.available)?,
            request_id: input.request_id,
        })
    }
}

impl Intake<(TargetRequest, UpdateRequest)> for Transformer {
    type To = UpdateItemDto;
    fn emit(&self, (target, input): (TargetRequest, UpdateRequest)) -> Self::To {
        UpdateItemDto {
            id: target.id,
            user_id: target.user_id,
            name: input.name,
            description: input.description,
            available: input.available,
        }
    }
}

impl TryIntake<(i64, SearchRequest)> for Transformer {
    type To = SearchItemDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user_id, input): (i64, SearchRequest)) -> Result<Self::To, Self::Error> {
        Ok(SearchItemDto {
            user_id,
            text: required("Search text", input.text)?,
        })
    }
}

impl TryIntake<(TargetRequest, CommentRequest)> for Transformer {
    type To = CreateCommentDto;
    type Error = Report<KernelError>;
    fn emit(
        &self,
        (target, input): (TargetRequest, CommentRequest),
    ) -> Result<Self::To, Self::Error> {
        Ok(CreateCommentDto {
            item_id: target.id,
            user_id: target.user_id,
            text: required("Comment text", input.text)?,
        })
    }
}

impl Intake<TargetRequest> for Transformer {
    type To = GetItemDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        GetItemDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}

impl Intake<i64> for Transformer {
    type To = GetOwnItemsDto;
    fn emit(&self, user_id: i64) -> Self::To {
        GetOwnItemsDto { user_id }
    }
}

/// [`Transformer`] reads a bare [`TargetRequest`] as a lookup.
pub struct DeleteTransformer;

impl Intake<TargetRequest> for DeleteTransformer {
    type To = DeleteItemDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        DeleteItemDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}
