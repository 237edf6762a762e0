mod request;
mod response;

use application::service::{GetBookingService, HandleBookingService};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use axum_extra::TypedHeader;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::booking::request::{
    ApprovalQuery, CreateRequest, DeleteTransformer, ListQuery, PatchCommand, TargetRequest,
    Transformer, UpdateRequest,
};
use crate::route::booking::response::Presenter;
use crate::route::SharerUserId;

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Query(req): Query<ListQuery>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user.id(), req))
                        .handle(|dto| async move { module.get_bookings_by_booker(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((user.id(), req))?
                        .handle(|dto| async move { module.create_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/bookings/owner",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Query(req): Query<ListQuery>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user.id(), req))
                        .handle(|dto| async move { module.get_bookings_by_owner(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/bookings/:id",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(TargetRequest::new(id, user.id()))
                        .handle(|dto| async move { module.get_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>,
                 Query(query): Query<ApprovalQuery>,
                 body: Option<Json<UpdateRequest>>| async move {
                    let body = body.map(|Json(body)| body);
                    Controller::new(Transformer, Presenter)
                        .try_intake((TargetRequest::new(id, user.id()), query, body))?
                        .handle(|command| async move {
                            match command {
                                PatchCommand::Approve(dto) => module.approve_booking(dto).await,
                                PatchCommand::Update(dto) => module.update_booking(dto).await,
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>| async move {
                    Controller::new(DeleteTransformer, Presenter)
                        .intake(TargetRequest::new(id, user.id()))
                        .handle(|dto| async move { module.delete_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
