use std::collections::HashMap;

use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::{DependOnBookingPolicy, OverlapScope};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnItemQuery, DependOnUserQuery,
};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::prelude::entity::{
    local_now, Booking, BookingDraft, BookingEnd, BookingId, BookingPeriod, BookingStart,
    BookingState, BookingStatus, DestructBooking, Item, ItemId, Pagination, User, UserId,
};
use kernel::KernelError;

use crate::service::lookup::{require_booking, require_item, require_user};
use crate::transfer::{
    ApproveBookingDto, BookingDto, CreateBookingDto, DeleteBookingDto, GetBookingDto,
    GetBookingsDto, UpdateBookingDto,
};

/// Requires `user_id` to exist and to be either the booker or the owner of
/// the booked item.
async fn check_access<T: DependOnUserQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    booking: &Booking,
    item: &Item,
    user_id: &UserId,
) -> error_stack::Result<(), KernelError> {
    require_user(module, con, user_id).await?;
    if booking.is_booked_by(user_id) || item.is_owned_by(user_id) {
        return Ok(());
    }
    Err(Report::new(KernelError::NotFound).attach_printable(format!(
        "Booking {} is not accessible to user {}",
        booking.id().as_ref(),
        user_id.as_ref()
    )))
}

/// Availability, ordering and overlap checks shared by creation and update.
async fn check_schedule<T: DependOnBookingQuery + DependOnBookingPolicy + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    item: &Item,
    period: &BookingPeriod,
    excluded: Option<&BookingId>,
) -> error_stack::Result<(), KernelError> {
    if !*item.available().as_ref() {
        tracing::debug!("item {} is not available", item.id().as_ref());
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("Item {} is not available", item.id().as_ref())));
    }
    if !period.is_ordered() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable("Booking start must be before its end"));
    }

    let policy = module.booking_policy();
    let scope = match policy.scope() {
        OverlapScope::Global => None,
        OverlapScope::Item => Some(item.id()),
    };
    let candidates = module
        .booking_query()
        .find_overlapping(con, period, scope, excluded)
        .await?;
    if let Some(conflict) = candidates
        .iter()
        .find(|existing| policy.rule().conflicts(period, &existing.period()))
    {
        tracing::debug!(
            "requested period collides with booking {}",
            conflict.id().as_ref()
        );
        return Err(Report::new(KernelError::Validation).attach_printable(format!(
            "Booking dates overlap booking {}",
            conflict.id().as_ref()
        )));
    }
    Ok(())
}

/// Resolves item and booker of every booking, querying each id once.
async fn compose_all<T: DependOnItemQuery + DependOnUserQuery + ?Sized>(
    module: &T,
    con: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    bookings: Vec<Booking>,
) -> error_stack::Result<Vec<BookingDto>, KernelError> {
    let mut items: HashMap<ItemId, Item> = HashMap::new();
    let mut users: HashMap<UserId, User> = HashMap::new();
    let mut composed = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let item = match items.get(booking.item_id()) {
            Some(item) => item.clone(),
            None => {
                let item = require_item(module, con, booking.item_id()).await?;
                items.insert(*booking.item_id(), item.clone());
                item
            }
        };
        let booker = match users.get(booking.booker_id()) {
            Some(user) => user.clone(),
            None => {
                let user = require_user(module, con, booking.booker_id()).await?;
                users.insert(*booking.booker_id(), user.clone());
                user
            }
        };
        composed.push(BookingDto::compose(booking, item, booker));
    }
    Ok(composed)
}

fn select_page(
    bookings: Vec<Booking>,
    state: &str,
    from: Option<i64>,
    size: Option<i64>,
) -> error_stack::Result<Vec<Booking>, KernelError> {
    let page = Pagination::new(from, size)?;
    let selected = BookingState::parse(state).select(bookings, &local_now())?;
    Ok(match page {
        Some(page) => page.apply(selected),
        None => selected,
    })
}

#[async_trait::async_trait]
pub trait GetBookingService:
    'static + Sync + Send + DependOnBookingQuery + DependOnItemQuery + DependOnUserQuery
{
    async fn get_booking(&self, dto: GetBookingDto) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let booking = require_booking(self, &mut connection, &BookingId::new(dto.id)).await?;
        let item = require_item(self, &mut connection, booking.item_id()).await?;
        check_access(self, &mut connection, &booking, &item, &user_id).await?;
        let booker = require_user(self, &mut connection, booking.booker_id()).await?;

        connection.commit().await?;
        Ok(BookingDto::compose(booking, item, booker))
    }

    async fn get_bookings_by_booker(
        &self,
        dto: GetBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        require_user(self, &mut connection, &user_id).await?;
        let bookings = self
            .booking_query()
            .find_by_booker(&mut connection, &user_id)
            .await?;
        let bookings = select_page(bookings, &dto.state, dto.from, dto.size)?;
        let bookings = compose_all(self, &mut connection, bookings).await?;

        connection.commit().await?;
        Ok(bookings)
    }

    async fn get_bookings_by_owner(
        &self,
        dto: GetBookingsDto,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        require_user(self, &mut connection, &user_id).await?;
        let bookings = self
            .booking_query()
            .find_by_owner(&mut connection, &user_id)
            .await?;
        let bookings = select_page(bookings, &dto.state, dto.from, dto.size)?;
        let bookings = compose_all(self, &mut connection, bookings).await?;

        connection.commit().await?;
        Ok(bookings)
    }
}

impl<T> GetBookingService for T where T: DependOnBookingQuery + DependOnItemQuery + DependOnUserQuery
{}

#[async_trait::async_trait]
pub trait HandleBookingService:
    'static
    + Sync
    + Send
    + DependOnBookingQuery
    + DependOnBookingModifier
    + DependOnItemQuery
    + DependOnUserQuery
    + DependOnBookingPolicy
{
    async fn create_booking(
        &self,
        dto: CreateBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.booking_modifier()
            .lock_schedule(&mut connection)
            .await?;

        let item = require_item(self, &mut connection, &ItemId::new(dto.item_id)).await?;
        let booker = require_user(self, &mut connection, &UserId::new(dto.user_id)).await?;
        if item.is_owned_by(booker.id()) {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "Item {} cannot be booked by its owner",
                item.id().as_ref()
            )));
        }

        let draft = BookingDraft::new(
            BookingStart::new(dto.start),
            BookingEnd::new(dto.end),
            *item.id(),
            *booker.id(),
        );
        let checked = check_schedule(self, &mut connection, &item, &draft.period(), None).await;
        if let Err(rejected) = checked {
            connection.roll_back().await?;
            return Err(rejected);
        }

        let booking = self
            .booking_modifier()
            .create(&mut connection, &draft)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "booking {} created for item {} by user {}",
            booking.id().as_ref(),
            item.id().as_ref(),
            booker.id().as_ref()
        );
        Ok(BookingDto::compose(booking, item, booker))
    }

    async fn update_booking(
        &self,
        dto: UpdateBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let UpdateBookingDto {
            id,
            user_id,
            start,
            end,
            status,
            item_id,
            booker_id,
        } = dto;
        let status = status
            .as_deref()
            .map(str::parse::<BookingStatus>)
            .transpose()?;

        let mut connection = self.database_connection().transact().await?;
        self.booking_modifier()
            .lock_schedule(&mut connection)
            .await?;

        let user_id = UserId::new(user_id);
        let booking = require_booking(self, &mut connection, &BookingId::new(id)).await?;
        let item = require_item(self, &mut connection, booking.item_id()).await?;
        check_access(self, &mut connection, &booking, &item, &user_id).await?;

        let DestructBooking {
            id,
            start: current_start,
            end: current_end,
            item_id: current_item,
            booker_id: current_booker,
            status: current_status,
        } = booking.into_destruct();
        let booking = Booking::new(
            id,
            start.map(BookingStart::new).unwrap_or(current_start),
            end.map(BookingEnd::new).unwrap_or(current_end),
            item_id.map(ItemId::new).unwrap_or(current_item),
            booker_id.map(UserId::new).unwrap_or(current_booker),
            status.unwrap_or(current_status),
        );

        let item = if booking.item_id() == item.id() {
            item
        } else {
            require_item(self, &mut connection, booking.item_id()).await?
        };
        let booker = require_user(self, &mut connection, booking.booker_id()).await?;
        let checked = check_schedule(
            self,
            &mut connection,
            &item,
            &booking.period(),
            Some(booking.id()),
        )
        .await;
        if let Err(rejected) = checked {
            connection.roll_back().await?;
            return Err(rejected);
        }

        self.booking_modifier()
            .update(&mut connection, &booking)
            .await?;
        connection.commit().await?;

        tracing::info!("booking {} updated", booking.id().as_ref());
        Ok(BookingDto::compose(booking, item, booker))
    }

    async fn approve_booking(
        &self,
        dto: ApproveBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let mut booking = require_booking(self, &mut connection, &BookingId::new(dto.id)).await?;
        let item = require_item(self, &mut connection, booking.item_id()).await?;
        require_user(self, &mut connection, &user_id).await?;
        if !item.is_owned_by(&user_id) {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "Booking {} can only be decided by the owner of item {}",
                booking.id().as_ref(),
                item.id().as_ref()
            )));
        }

        let status = booking.status().decide(dto.approved)?;
        booking.substitute(|booking| *booking.status = status);
        self.booking_modifier()
            .update(&mut connection, &booking)
            .await?;
        let booker = require_user(self, &mut connection, booking.booker_id()).await?;
        connection.commit().await?;

        tracing::info!("booking {} is now {}", booking.id().as_ref(), status);
        Ok(BookingDto::compose(booking, item, booker))
    }

    async fn delete_booking(&self, dto: DeleteBookingDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let booking = require_booking(self, &mut connection, &BookingId::new(dto.id)).await?;
        let item = require_item(self, &mut connection, booking.item_id()).await?;
        check_access(self, &mut connection, &booking, &item, &user_id).await?;

        self.booking_modifier()
            .delete(&mut connection, booking.id())
            .await?;
        connection.commit().await?;

        tracing::info!("booking {} deleted", booking.id().as_ref());
        Ok(())
    }
}

impl<T> HandleBookingService for T where
    T: DependOnBookingQuery
        + DependOnBookingModifier
        + DependOnItemQuery
        + DependOnUserQuery
        + DependOnBookingPolicy
{
}

#[cfg(test)]
mod test {
    use time::{Duration, PrimitiveDateTime};

    use kernel::interface::policy::{BookingPolicy, OverlapRule, OverlapScope};
    use kernel::prelude::entity::{local_now, BookingId, BookingStatus, ItemId, UserId};
    use kernel::KernelError;

    use crate::mock::MockModule;
    use crate::service::{GetBookingService, HandleBookingService};
    use crate::transfer::{
        ApproveBookingDto, CreateBookingDto, DeleteBookingDto, GetBookingDto, GetBookingsDto,
        UpdateBookingDto,
    };

    fn at(hours: i64) -> PrimitiveDateTime {
        local_now() + Duration::hours(hours)
    }

    fn create(user: UserId, item: ItemId, start: i64, end: i64) -> CreateBookingDto {
        CreateBookingDto {
            user_id: *user.as_ref(),
            item_id: *item.as_ref(),
            start: at(start),
            end: at(end),
        }
    }

    fn listing(user: UserId, state: &str) -> GetBookingsDto {
        GetBookingsDto {
            user_id: *user.as_ref(),
            state: state.to_string(),
            from: None,
            size: None,
        }
    }

    fn approve(owner: UserId, booking: i64, approved: bool) -> ApproveBookingDto {
        ApproveBookingDto {
            id: booking,
            user_id: *owner.as_ref(),
            approved,
        }
    }

    struct Fixture {
        module: MockModule,
        owner: UserId,
        booker: UserId,
        stranger: UserId,
        item: ItemId,
    }

    fn fixture(policy: BookingPolicy) -> Fixture {
        let module = MockModule::new(policy);
        let owner = module.add_user("owner");
        let booker = module.add_user("booker");
        let stranger = module.add_user("stranger");
        let item = module.add_item(owner, true);
        Fixture {
            module,
            owner,
            booker,
            stranger,
            item,
        }
    }

    #[tokio::test]
    async fn create_stores_waiting_booking() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());

        let booking = module.create_booking(create(booker, item, 24, 48)).await?;
        assert_eq!(booking.status, "WAITING");
        assert_eq!(booking.booker.id, *booker.as_ref());
        assert_eq!(booking.item.id, *item.as_ref());
        assert_eq!(booking.item.owner_id, *owner.as_ref());
        assert!(module.booking(BookingId::new(booking.id)).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn owner_cannot_book_own_item() {
        let Fixture {
            module, owner, item, ..
        } = fixture(BookingPolicy::default());

        let err = module
            .create_booking(create(owner, item, 24, 48))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
        assert_eq!(module.booking_count(), 0);
    }

    #[tokio::test]
    async fn missing_item_or_user_is_not_found() {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());

        let err = module
            .create_booking(create(booker, ItemId::new(999), 24, 48))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));

        let err = module
            .create_booking(create(UserId::new(999), item, 24, 48))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn unavailable_item_is_rejected() {
        let Fixture {
            module,
            owner,
            booker,
            ..
        } = fixture(BookingPolicy::default());
        let item = module.add_item(owner, false);

        let err = module
            .create_booking(create(booker, item, 24, 48))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
    }

    #[tokio::test]
    async fn start_must_precede_end() {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());

        for (start, end) in [(48, 24), (24, 24)] {
            let err = module
                .create_booking(create(booker, item, start, end))
                .await
                .unwrap_err();
            assert!(matches!(err.current_context(), KernelError::Validation));
        }
        assert_eq!(module.booking_count(), 0);
    }

    #[tokio::test]
    async fn nested_interval_on_another_item_is_rejected() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            stranger,
            item,
        } = fixture(BookingPolicy::default());
        let other_item = module.add_item(owner, true);

        module.create_booking(create(booker, item, 24, 48)).await?;
        let err = module
            .create_booking(create(stranger, other_item, 25, 26))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        assert_eq!(module.booking_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn literal_rule_lets_covering_interval_through() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            stranger,
            item,
            ..
        } = fixture(BookingPolicy::default());

        module.create_booking(create(booker, item, 24, 48)).await?;
        module.create_booking(create(stranger, item, 20, 50)).await?;
        assert_eq!(module.booking_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn standard_rule_rejects_any_intersection() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            stranger,
            item,
            ..
        } = fixture(BookingPolicy::new(OverlapRule::Standard, OverlapScope::Global));

        module.create_booking(create(booker, item, 24, 48)).await?;
        let err = module
            .create_booking(create(stranger, item, 20, 50))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        assert_eq!(module.rollback_count(), 1);

        module.create_booking(create(stranger, item, 48, 60)).await?;
        assert_eq!(module.rollback_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn item_scope_ignores_other_items() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            stranger,
            item,
        } = fixture(BookingPolicy::new(OverlapRule::Literal, OverlapScope::Item));
        let other_item = module.add_item(owner, true);

        module.create_booking(create(booker, item, 24, 48)).await?;
        module
            .create_booking(create(stranger, other_item, 25, 26))
            .await?;
        let err = module
            .create_booking(create(stranger, item, 25, 26))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        Ok(())
    }

    #[tokio::test]
    async fn approval_is_one_shot_per_direction() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;

        let approved = module.approve_booking(approve(owner, booking.id, true)).await?;
        assert_eq!(approved.status, "APPROVED");

        let err = module
            .approve_booking(approve(owner, booking.id, true))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        assert!(format!("{err:?}").contains("Booking is already approved"));

        let rejected = module.approve_booking(approve(owner, booking.id, false)).await?;
        assert_eq!(rejected.status, "REJECTED");

        let err = module
            .approve_booking(approve(owner, booking.id, false))
            .await
            .unwrap_err();
        assert!(format!("{err:?}").contains("Booking is already rejected"));
        Ok(())
    }

    #[tokio::test]
    async fn only_item_owner_decides() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;

        let err = module
            .approve_booking(approve(booker, booking.id, true))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
        let stored = module.booking(BookingId::new(booking.id)).unwrap();
        assert_eq!(*stored.status(), BookingStatus::Waiting);
        Ok(())
    }

    #[tokio::test]
    async fn third_party_has_no_access() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            stranger,
            item,
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;

        let err = module
            .get_booking(GetBookingDto {
                id: booking.id,
                user_id: *stranger.as_ref(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));

        let err = module
            .delete_booking(DeleteBookingDto {
                id: booking.id,
                user_id: *stranger.as_ref(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
        assert_eq!(module.booking_count(), 1);

        for user in [owner, booker] {
            let found = module
                .get_booking(GetBookingDto {
                    id: booking.id,
                    user_id: *user.as_ref(),
                })
                .await?;
            assert_eq!(found.id, booking.id);
        }
        Ok(())
    }

    #[tokio::test]
    async fn deleted_booking_is_gone() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;

        module
            .delete_booking(DeleteBookingDto {
                id: booking.id,
                user_id: *booker.as_ref(),
            })
            .await?;
        let err = module
            .get_booking(GetBookingDto {
                id: booking.id,
                user_id: *booker.as_ref(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn update_excludes_itself_from_overlap() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;
        let (start, end) = (at(30), at(40));

        let updated = module
            .update_booking(UpdateBookingDto {
                id: booking.id,
                user_id: *booker.as_ref(),
                start: Some(start),
                end: Some(end),
                status: None,
                item_id: None,
                booker_id: None,
            })
            .await?;
        assert_eq!((updated.start, updated.end), (start, end));
        assert_eq!(updated.status, "WAITING");
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_unordered_merge() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let booking = module.create_booking(create(booker, item, 24, 48)).await?;

        let err = module
            .update_booking(UpdateBookingDto {
                id: booking.id,
                user_id: *booker.as_ref(),
                start: Some(at(50)),
                end: None,
                status: None,
                item_id: None,
                booker_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        let stored = module.booking(BookingId::new(booking.id)).unwrap();
        assert_eq!(stored.start().as_ref(), &booking.start);
        assert_eq!(module.rollback_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_state_is_rejected() {
        let Fixture { module, booker, .. } = fixture(BookingPolicy::default());

        for state in ["UNKNOWN_TOKEN", "past", ""] {
            let err = module
                .get_bookings_by_booker(listing(booker, state))
                .await
                .unwrap_err();
            assert!(matches!(err.current_context(), KernelError::Validation));
            assert!(format!("{err:?}").contains("Unknown state: UNSUPPORTED_STATUS"));
        }
    }

    #[tokio::test]
    async fn listing_requires_existing_user() {
        let Fixture { module, .. } = fixture(BookingPolicy::default());

        let err = module
            .get_bookings_by_owner(listing(UserId::new(999), "ALL"))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn listing_filters_by_state_and_orders_by_id() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let past = module.add_booking(item, booker, at(-48), at(-24), BookingStatus::Approved);
        let ongoing = module.add_booking(item, booker, at(-1), at(1), BookingStatus::Approved);
        let future = module.add_booking(item, booker, at(24), at(48), BookingStatus::Waiting);
        let rejected = module.add_booking(item, booker, at(72), at(96), BookingStatus::Rejected);

        let ids = |bookings: Vec<crate::transfer::BookingDto>| {
            bookings.into_iter().map(|booking| booking.id).collect::<Vec<_>>()
        };

        let all = module.get_bookings_by_booker(listing(booker, "ALL")).await?;
        assert_eq!(
            ids(all),
            vec![
                *rejected.as_ref(),
                *future.as_ref(),
                *ongoing.as_ref(),
                *past.as_ref()
            ]
        );

        let past_bookings = module.get_bookings_by_booker(listing(booker, "PAST")).await?;
        assert!(past_bookings.iter().all(|booking| booking.end < local_now()));
        assert_eq!(ids(past_bookings), vec![*past.as_ref()]);

        let future_bookings = module.get_bookings_by_owner(listing(owner, "FUTURE")).await?;
        assert_eq!(ids(future_bookings), vec![*future.as_ref()]);

        let waiting = module.get_bookings_by_owner(listing(owner, "WAITING")).await?;
        assert_eq!(ids(waiting), vec![*future.as_ref()]);

        let rejected_bookings = module.get_bookings_by_owner(listing(owner, "REJECTED")).await?;
        assert_eq!(ids(rejected_bookings), vec![*rejected.as_ref()]);

        // CURRENT selects rejected bookings in progress, and there are none.
        let current = module.get_bookings_by_booker(listing(booker, "CURRENT")).await?;
        assert!(current.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn owner_listing_covers_owned_items_only() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            owner,
            booker,
            stranger,
            item,
        } = fixture(BookingPolicy::default());
        let foreign_item = module.add_item(stranger, true);
        let own = module.add_booking(item, booker, at(24), at(48), BookingStatus::Waiting);
        module.add_booking(foreign_item, booker, at(72), at(96), BookingStatus::Waiting);

        let bookings = module.get_bookings_by_owner(listing(owner, "ALL")).await?;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, *own.as_ref());
        Ok(())
    }

    #[tokio::test]
    async fn listing_pages_after_filtering() -> error_stack::Result<(), KernelError> {
        let Fixture {
            module,
            booker,
            item,
            ..
        } = fixture(BookingPolicy::default());
        let ids = (0..5)
            .map(|n| {
                module.add_booking(
                    item,
                    booker,
                    at(24 * (n + 1)),
                    at(24 * (n + 1) + 1),
                    BookingStatus::Waiting,
                )
            })
            .collect::<Vec<_>>();
        module.add_booking(item, booker, at(-48), at(-24), BookingStatus::Approved);

        let page = module
            .get_bookings_by_booker(GetBookingsDto {
                from: Some(1),
                size: Some(2),
                ..listing(booker, "FUTURE")
            })
            .await?;
        let page = page.into_iter().map(|booking| booking.id).collect::<Vec<_>>();
        assert_eq!(page, vec![*ids[3].as_ref(), *ids[2].as_ref()]);

        let err = module
            .get_bookings_by_booker(GetBookingsDto {
                from: Some(-1),
                size: Some(2),
                ..listing(booker, "ALL")
            })
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), KernelError::Validation));
        Ok(())
    }
}
