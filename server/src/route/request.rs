mod request;
mod response;

use application::service::{GetItemRequestService, HandleItemRequestService};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use axum_extra::TypedHeader;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::request::request::{
    CreateRequest, DeleteTransformer, PageQuery, TargetRequest, Transformer,
};
use crate::route::request::response::Presenter;
use crate::route::SharerUserId;

pub trait ItemRequestRouter {
    fn route_item_request(self) -> Self;
}

impl ItemRequestRouter for Router<AppModule> {
    fn route_item_request(self) -> Self {
        self.route(
            "/requests",
            get(
                |State(module): State<AppModule>, TypedHeader(user): TypedHeader<SharerUserId>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(user.id())
                        .handle(|dto| async move { module.get_own_item_requests(dto).await })
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
                        .handle(|dto| async move { module.create_item_request(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/requests/all",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Query(req): Query<PageQuery>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user.id(), req))
                        .handle(|dto| async move { module.get_other_item_requests(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/requests/:id",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(TargetRequest::new(id, user.id()))
                        .handle(|dto| async move { module.get_item_request(dto).await })
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
                        .handle(|dto| async move { module.delete_item_request(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
