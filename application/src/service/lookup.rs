use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnItemQuery, DependOnItemRequestQuery,
    DependOnUserQuery, ItemQuery, ItemRequestQuery, UserQuery,
};
use kernel::prelude::entity::{
    Booking, BookingId, Item, ItemId, ItemRequest, ItemRequestId, User, UserId,
};
use kernel::KernelError;

pub(crate) async fn require_user<T: DependOnUserQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &UserId,
) -> error_stack::Result<User, KernelError> {
    module
        .user_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("User {} not found", id.as_ref()))
        })
}

pub(crate) async fn require_item<T: DependOnItemQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &ItemId,
) -> error_stack::Result<Item, KernelError> {
    module
        .item_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Item {} not found", id.as_ref()))
        })
}

pub(crate) async fn require_booking<T: DependOnBookingQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &BookingId,
) -> error_stack::Result<Booking, KernelError> {
    module
        .booking_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Booking {} not found", id.as_ref()))
        })
}

pub(crate) async fn require_item_request<T: DependOnItemRequestQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &ItemRequestId,
) -> error_stack::Result<ItemRequest, KernelError> {
    module
        .item_request_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Item request {} not found", id.as_ref()))
        })
}

/// Resolves an item and checks that `user_id` owns it. A foreign item is
/// reported exactly like a missing one.
pub(crate) async fn require_owned_item<T: DependOnItemQuery + DependOnUserQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &ItemId,
    user_id: &UserId,
) -> error_stack::Result<Item, KernelError> {
    require_user(module, con, user_id).await?;
    let item = require_item(module, con, id).await?;
    if !item.is_owned_by(user_id) {
        return Err(Report::new(KernelError::NotFound).attach_printable(format!(
            "Item {} is not owned by user {}",
            id.as_ref(),
            user_id.as_ref()
        )));
    }
    Ok(item)
}

pub(crate) fn reject_blank(field: &str, value: &str) -> error_stack::Result<(), KernelError> {
    if value.trim().is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} must not be blank")));
    }
    Ok(())
}
