pub(super) mod response;
mod request;

use application::service::{CommentItemService, GetItemService, HandleItemService};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::Query;
use axum_extra::TypedHeader;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::item::request::{
    CommentRequest, CreateRequest, DeleteTransformer, SearchRequest, TargetRequest, Transformer,
    UpdateRequest,
};
use crate::route::item::response::Presenter;
use crate::route::SharerUserId;

pub trait ItemRouter {
    fn route_item(self) -> Self;
}

impl ItemRouter for Router<AppModule> {
    fn route_item(self) -> Self {
        self.route(
            "/items",
            get(
                |State(module): State<AppModule>, TypedHeader(user): TypedHeader<SharerUserId>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(user.id())
                        .handle(|dto| async move { module.get_own_items(dto).await })
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
                        .handle(|dto| async move { module.create_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/search",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((user.id(), req))?
                        .handle(|dto| async move { module.search_items(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/:id",
            get(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(TargetRequest::new(id, user.id()))
                        .handle(|dto| async move { module.get_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((TargetRequest::new(id, user.id()), req))
                        .handle(|dto| async move { module.update_item(dto).await })
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
                        .handle(|dto| async move { module.delete_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/:id/comment",
            post(
                |State(module): State<AppModule>,
                 TypedHeader(user): TypedHeader<SharerUserId>,
                 Path(id): Path<i64>,
                 Json(req): Json<CommentRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((TargetRequest::new(id, user.id()), req))?
                        .handle(|dto| async move { module.create_comment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
