use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnItemQuery, DependOnItemRequestQuery, DependOnUserQuery, ItemQuery, ItemRequestQuery,
};
use kernel::interface::update::{DependOnItemRequestModifier, ItemRequestModifier};
use kernel::prelude::entity::{
    local_now, CreatedAt, ItemRequest, ItemRequestDescription, ItemRequestDraft, ItemRequestId,
    Pagination, UserId,
};
use kernel::KernelError;

use crate::service::lookup::{reject_blank, require_item_request, require_user};
use crate::transfer::{
    CreateItemRequestDto, DeleteItemRequestDto, GetItemRequestDto, GetOtherItemRequestsDto,
    GetOwnItemRequestsDto, ItemDto, ItemRequestDto,
};

async fn with_items<T: DependOnItemQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    requests: Vec<ItemRequest>,
) -> error_stack::Result<Vec<ItemRequestDto>, KernelError> {
    let mut composed = Vec::with_capacity(requests.len());
    for request in requests {
        let items = module
            .item_query()
            .find_by_request(con, request.id())
            .await?
            .into_iter()
            .map(ItemDto::from)
            .collect();
        composed.push(ItemRequestDto::compose(request, items));
    }
    Ok(composed)
}

#[async_trait::async_trait]
pub trait GetItemRequestService:
    'static + Sync + Send + DependOnItemRequestQuery + DependOnItemQuery + DependOnUserQuery
{
    async fn get_item_request(
        &self,
        dto: GetItemRequestDto,
    ) -> error_stack::Result<ItemRequestDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        let request =
            require_item_request(self, &mut connection, &ItemRequestId::new(dto.id)).await?;
        let mut composed = with_items(self, &mut connection, vec![request]).await?;

        connection.commit().await?;
        composed.pop().ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("Item request vanished")
        })
    }

    /// The caller's own requests, oldest first.
    async fn get_own_item_requests(
        &self,
        dto: GetOwnItemRequestsDto,
    ) -> error_stack::Result<Vec<ItemRequestDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let requestor = UserId::new(dto.user_id);
        require_user(self, &mut connection, &requestor).await?;
        let requests = self
            .item_request_query()
            .find_by_requestor(&mut connection, &requestor)
            .await?;
        let requests = with_items(self, &mut connection, requests).await?;

        connection.commit().await?;
        Ok(requests)
    }

    /// Everybody else's requests, newest first. Without a full `from`/`size`
    /// window nothing is listed.
    async fn get_other_item_requests(
        &self,
        dto: GetOtherItemRequestsDto,
    ) -> error_stack::Result<Vec<ItemRequestDto>, KernelError> {
        let Some(page) = Pagination::new(dto.from, dto.size)? else {
            return Ok(Vec::new());
        };

        let mut connection = self.database_connection().transact().await?;

        let requestor = UserId::new(dto.user_id);
        require_user(self, &mut connection, &requestor).await?;
        let requests = self
            .item_request_query()
            .find_by_other_requestors(&mut connection, &requestor, page.limit(), page.offset())
            .await?;
        let requests = with_items(self, &mut connection, requests).await?;

        connection.commit().await?;
        Ok(requests)
    }
}

impl<T> GetItemRequestService for T where
    T: DependOnItemRequestQuery + DependOnItemQuery + DependOnUserQuery
{
}

#[async_trait::async_trait]
pub trait HandleItemRequestService:
    'static + Sync + Send + DependOnItemRequestQuery + DependOnItemRequestModifier + DependOnUserQuery
{
    async fn create_item_request(
        &self,
        dto: CreateItemRequestDto,
    ) -> error_stack::Result<ItemRequestDto, KernelError> {
        reject_blank("Request description", &dto.description)?;

        let mut connection = self.database_connection().transact().await?;

        let requestor = require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        let draft = ItemRequestDraft::new(
            ItemRequestDescription::new(dto.description),
            *requestor.id(),
            CreatedAt::new(local_now()),
        );
        let request = self
            .item_request_modifier()
            .create(&mut connection, &draft)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "item request {} created by user {}",
            request.id().as_ref(),
            requestor.id().as_ref()
        );
        Ok(ItemRequestDto::compose(request, Vec::new()))
    }

    /// Only the requestor may withdraw a request.
    async fn delete_item_request(
        &self,
        dto: DeleteItemRequestDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        require_user(self, &mut connection, &user_id).await?;
        let request =
            require_item_request(self, &mut connection, &ItemRequestId::new(dto.id)).await?;
        if request.requestor_id() != &user_id {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "Item request {} is not owned by user {}",
                request.id().as_ref(),
                user_id.as_ref()
            )));
        }
        self.item_request_modifier()
            .delete(&mut connection, request.id())
            .await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<T> HandleItemRequestService for T where
    T: DependOnItemRequestQuery + DependOnItemRequestModifier + DependOnUserQuery
{
}
