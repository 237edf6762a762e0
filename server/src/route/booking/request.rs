use application::transfer::{
    ApproveBookingDto, CreateBookingDto, DeleteBookingDto, GetBookingDto, GetBookingsDto,
    UpdateBookingDto,
};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::controller::{Intake, TryIntake};
use crate::route::required;

const DEFAULT_STATE: &str = "ALL";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default, with = "crate::local_date_time::option")]
    start: Option<PrimitiveDateTime>,
    #[serde(default, with = "crate::local_date_time::option")]
    end: Option<PrimitiveDateTime>,
    item_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default, with = "crate::local_date_time::option")]
    start: Option<PrimitiveDateTime>,
    #[serde(default, with = "crate::local_date_time::option")]
    end: Option<PrimitiveDateTime>,
    status: Option<String>,
    item_id: Option<i64>,
    booker_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    approved: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    state: Option<String>,
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

/// `PATCH /bookings/:id` either decides a waiting booking or edits its fields.
#[derive(Debug)]
pub enum PatchCommand {
    Approve(ApproveBookingDto),
    Update(UpdateBookingDto),
}

pub struct Transformer;

impl TryIntake<(i64, CreateRequest)> for Transformer {
    type To = CreateBookingDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user_id, input): (i64, CreateRequest)) -> Result<Self::To, Self::Error> {
        Ok(CreateBookingDto {
            user_id,
            item_id: required("Booking item", input.item_id)?,
            start: required("Booking start", input.start)?,
            end: required("Booking end", input.end)?,
        })
    }
}

impl TryIntake<(TargetRequest, ApprovalQuery, Option<UpdateRequest>)> for Transformer {
    type To = PatchCommand;
    type Error = Report<KernelError>;
    fn emit(
        &self,
        (target, query, body): (TargetRequest, ApprovalQuery, Option<UpdateRequest>),
    ) -> Result<Self::To, Self::Error> {
        if let Some(approved) = query.approved {
            return Ok(PatchCommand::Approve(ApproveBookingDto {
                id: target.id,
                user_id: target.user_id,
                approved,
            }));
        }
        let body = body.ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable("Either `approved` or a booking body must be given")
        })?;
        Ok(PatchCommand::Update(UpdateBookingDto {
            id: target.id,
            user_id: target.user_id,
            start: body.start,
            end: body.end,
            status: body.status,
            item_id: body.item_id,
            booker_id: body.booker_id,
        }))
    }
}

impl Intake<(i64, ListQuery)> for Transformer {
    type To = GetBookingsDto;
    fn emit(&self, (user_id, query): (i64, ListQuery)) -> Self::To {
        GetBookingsDto {
            user_id,
            state: query.state.unwrap_or_else(|| DEFAULT_STATE.to_string()),
            from: query.from,
            size: query.size,
        }
    }
}

impl Intake<TargetRequest> for Transformer {
    type To = GetBookingDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        GetBookingDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}

/// [`Transformer`] reads a bare [`TargetRequest`] as a lookup.
pub struct DeleteTransformer;

impl Intake<TargetRequest> for DeleteTransformer {
    type To = DeleteBookingDto;
    fn emit(&self, input: TargetRequest) -> Self::To {
        DeleteBookingDto {
            id: input.id,
            user_id: input.user_id,
        }
    }
}
