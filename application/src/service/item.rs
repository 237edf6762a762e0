use std::collections::HashMap;

use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, CommentQuery, DependOnBookingQuery, DependOnCommentQuery, DependOnItemQuery,
    DependOnItemRequestQuery, DependOnUserQuery, ItemQuery,
};
use kernel::interface::update::{
    CommentModifier, DependOnCommentModifier, DependOnItemModifier, ItemModifier,
};
use kernel::prelude::entity::{
    local_now, Comment, CommentDraft, CommentText, CreatedAt, DestructComment, Item,
    ItemAvailable, ItemDescription, ItemDraft, ItemId, ItemName, ItemRequestId, User, UserId,
};
use kernel::KernelError;

use crate::service::lookup::{
    reject_blank, require_item, require_item_request, require_owned_item, require_user,
};
use crate::transfer::{
    BookingShortDto, CommentDto, CreateCommentDto, CreateItemDto, DeleteItemDto, GetItemDto,
    GetOwnItemsDto, ItemDto, ItemWithBookingDto, SearchItemDto, UpdateItemDto,
};

fn compose_comment(comment: Comment, author: &User) -> CommentDto {
    let DestructComment {
        id, text, created, ..
    } = comment.into_destruct();
    CommentDto {
        id: id.into(),
        text: text.into(),
        author_name: author.name().as_ref().clone(),
        created: created.into(),
    }
}

async fn compose_comments<T: DependOnUserQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    comments: Vec<Comment>,
) -> error_stack::Result<Vec<CommentDto>, KernelError> {
    let mut authors: HashMap<UserId, User> = HashMap::new();
    let mut composed = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = match authors.get(comment.author_id()) {
            Some(author) => author.clone(),
            None => {
                let author = require_user(module, con, comment.author_id()).await?;
                authors.insert(*comment.author_id(), author.clone());
                author
            }
        };
        composed.push(compose_comment(comment, &author));
    }
    Ok(composed)
}

/// The item with its comments, plus the neighbouring bookings when the
/// viewer owns it.
async fn compose_item<T>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    item: Item,
    viewer: &UserId,
) -> error_stack::Result<ItemWithBookingDto, KernelError>
where
    T: DependOnBookingQuery + DependOnCommentQuery + DependOnUserQuery + ?Sized,
{
    let (last_booking, next_booking) = if item.is_owned_by(viewer) {
        let now = local_now();
        let last = module
            .booking_query()
            .find_last_by_item(con, item.id(), &now)
            .await?;
        let next = module
            .booking_query()
            .find_next_by_item(con, item.id(), &now)
            .await?;
        (
            last.as_ref().map(BookingShortDto::from),
            next.as_ref().map(BookingShortDto::from),
        )
    } else {
        (None, None)
    };
    let comments = module.comment_query().find_by_item(con, item.id()).await?;
    let comments = compose_comments(module, con, comments).await?;
    Ok(ItemWithBookingDto {
        item: ItemDto::from(item),
        last_booking,
        next_booking,
        comments,
    })
}

#[async_trait::async_trait]
pub trait GetItemService:
    'static
    + Sync
    + Send
    + DependOnItemQuery
    + DependOnUserQuery
    + DependOnBookingQuery
    + DependOnCommentQuery
{
    async fn get_item(&self, dto: GetItemDto) -> error_stack::Result<ItemWithBookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let viewer = UserId::new(dto.user_id);
        require_user(self, &mut connection, &viewer).await?;
        let item = require_item(self, &mut connection, &ItemId::new(dto.id)).await?;
        let item = compose_item(self, &mut connection, item, &viewer).await?;

        connection.commit().await?;
        Ok(item)
    }

    async fn get_own_items(
        &self,
        dto: GetOwnItemsDto,
    ) -> error_stack::Result<Vec<ItemWithBookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let owner = UserId::new(dto.user_id);
        require_user(self, &mut connection, &owner).await?;
        let items = self
            .item_query()
            .find_by_owner(&mut connection, &owner)
            .await?;
        let mut composed = Vec::with_capacity(items.len());
        for item in items {
            composed.push(compose_item(self, &mut connection, item, &owner).await?);
        }

        connection.commit().await?;
        Ok(composed)
    }

    /// Blank text matches nothing.
    async fn search_items(&self, dto: SearchItemDto) -> error_stack::Result<Vec<ItemDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        let text = dto.text.trim();
        let items = if text.is_empty() {
            Vec::new()
        } else {
            self.item_query().search(&mut connection, text).await?
        };

        connection.commit().await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }
}

impl<T> GetItemService for T where
    T: DependOnItemQuery + DependOnUserQuery + DependOnBookingQuery + DependOnCommentQuery
{
}

#[async_trait::async_trait]
pub trait HandleItemService:
    'static
    + Sync
    + Send
    + DependOnItemQuery
    + DependOnItemModifier
    + DependOnUserQuery
    + DependOnItemRequestQuery
{
    async fn create_item(&self, dto: CreateItemDto) -> error_stack::Result<ItemDto, KernelError> {
        reject_blank("Item name", &dto.name)?;
        reject_blank("Item description", &dto.description)?;

        let mut connection = self.database_connection().transact().await?;

        let owner = require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        let request_id = match dto.request_id {
            Some(id) => {
                let request =
                    require_item_request(self, &mut connection, &ItemRequestId::new(id)).await?;
                Some(*request.id())
            }
            None => None,
        };
        let draft = ItemDraft::new(
            ItemName::new(dto.name),
            ItemDescription::new(dto.description),
            ItemAvailable::new(dto.available),
            *owner.id(),
            request_id,
        );
        let item = self.item_modifier().create(&mut connection, &draft).await?;
        connection.commit().await?;

        tracing::info!(
            "item {} created by user {}",
            item.id().as_ref(),
            owner.id().as_ref()
        );
        Ok(ItemDto::from(item))
    }

    async fn update_item(&self, dto: UpdateItemDto) -> error_stack::Result<ItemDto, KernelError> {
        if let Some(name) = &dto.name {
            reject_blank("Item name", name)?;
        }
        if let Some(description) = &dto.description {
            reject_blank("Item description", description)?;
        }

        let mut connection = self.database_connection().transact().await?;

        let mut item = require_owned_item(
            self,
            &mut connection,
            &ItemId::new(dto.id),
            &UserId::new(dto.user_id),
        )
        .await?;
        item.substitute(|item| {
            if let Some(name) = dto.name {
                *item.name = ItemName::new(name);
            }
            if let Some(description) = dto.description {
                *item.description = ItemDescription::new(description);
            }
            if let Some(available) = dto.available {
                *item.available = ItemAvailable::new(available);
            }
        });
        self.item_modifier().update(&mut connection, &item).await?;
        connection.commit().await?;

        Ok(ItemDto::from(item))
    }

    async fn delete_item(&self, dto: DeleteItemDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let item = require_owned_item(
            self,
            &mut connection,
            &ItemId::new(dto.id),
            &UserId::new(dto.user_id),
        )
        .await?;
        self.item_modifier().delete(&mut connection, item.id()).await?;
        connection.commit().await?;

        tracing::info!("item {} deleted", item.id().as_ref());
        Ok(())
    }
}

impl<T> HandleItemService for T where
    T: DependOnItemQuery + DependOnItemModifier + DependOnUserQuery + DependOnItemRequestQuery
{
}

#[async_trait::async_trait]
pub trait CommentItemService:
    'static
    + Sync
    + Send
    + DependOnItemQuery
    + DependOnUserQuery
    + DependOnBookingQuery
    + DependOnCommentModifier
{
    /// Only users whose booking of the item has already ended may comment.
    async fn create_comment(
        &self,
        dto: CreateCommentDto,
    ) -> error_stack::Result<CommentDto, KernelError> {
        reject_blank("Comment text", &dto.text)?;

        let mut connection = self.database_connection().transact().await?;

        let author = require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        let item = require_item(self, &mut connection, &ItemId::new(dto.item_id)).await?;
        let now = local_now();
        let finished = self
            .booking_query()
            .find_finished_by_item_and_booker(&mut connection, item.id(), author.id(), &now)
            .await?;
        if finished.is_none() {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "User {} has no finished booking of item {}",
                author.id().as_ref(),
                item.id().as_ref()
            )));
        }

        let draft = CommentDraft::new(
            CommentText::new(dto.text),
            *item.id(),
            *author.id(),
            CreatedAt::new(now),
        );
        let comment = self
            .comment_modifier()
            .create(&mut connection, &draft)
            .await?;
        connection.commit().await?;

        Ok(compose_comment(comment, &author))
    }
}

impl<T> CommentItemService for T where
    T: DependOnItemQuery + DependOnUserQuery + DependOnBookingQuery + DependOnCommentModifier
{
}
