use error_stack::Report;
use sqlx::PgConnection;
use time::PrimitiveDateTime;

use kernel::interface::query::BookingQuery;
use kernel::interface::update::BookingModifier;
use kernel::prelude::entity::{
    Booking, BookingDraft, BookingEnd, BookingId, BookingPeriod, BookingStart, BookingStatus,
    ItemId, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery for PostgresBookingRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_id(con, id).await
    }

    async fn find_by_booker(
        &self,
        con: &mut PostgresTransaction,
        booker_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_booker(con, booker_id).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresTransaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_owner(con, owner_id).await
    }

    async fn find_overlapping(
        &self,
        con: &mut PostgresTransaction,
        period: &BookingPeriod,
        item_id: Option<&ItemId>,
        excluded: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_overlapping(con, period, item_id, excluded).await
    }

    async fn find_last_by_item(
        &self,
        con: &mut PostgresTransaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_last_by_item(con, item_id, now).await
    }

    async fn find_next_by_item(
        &self,
        con: &mut PostgresTransaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_next_by_item(con, item_id, now).await
    }

    async fn find_finished_by_item_and_booker(
        &self,
        con: &mut PostgresTransaction,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_finished_by_item_and_booker(con, item_id, booker_id, now).await
    }
}

#[async_trait::async_trait]
impl BookingModifier for PostgresBookingRepository {
    type Transaction = PostgresTransaction;

    async fn lock_schedule(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::lock_schedule(con).await
    }

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        booking: &BookingDraft,
    ) -> error_stack::Result<Booking, KernelError> {
        PgBookingInternal::create(con, booking).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update(con, booking).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        booking_id: &BookingId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::delete(con, booking_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    start_date: PrimitiveDateTime,
    end_date: PrimitiveDateTime,
    item_id: i64,
    booker_id: i64,
    status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Report<KernelError>;
    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking::new(
            BookingId::new(row.id),
            BookingStart::new(row.start_date),
            BookingEnd::new(row.end_date),
            ItemId::new(row.item_id),
            UserId::new(row.booker_id),
            row.status.parse::<BookingStatus>()?,
        ))
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> error_stack::Result<Vec<Booking>, KernelError> {
    rows.into_iter().map(Booking::try_from).collect()
}

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_by_booker(
        con: &mut PgConnection,
        booker_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE booker_id = $1
            "#,
        )
        .bind(booker_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_by_owner(
        con: &mut PgConnection,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT b.id, b.start_date, b.end_date, b.item_id, b.booker_id, b.status
            FROM bookings b
            JOIN items i ON i.id = b.item_id
            WHERE i.owner_id = $1
            "#,
        )
        .bind(owner_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_overlapping(
        con: &mut PgConnection,
        period: &BookingPeriod,
        item_id: Option<&ItemId>,
        excluded: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE start_date < $2
              AND end_date > $1
              AND ($3::BIGINT IS NULL OR item_id = $3)
              AND ($4::BIGINT IS NULL OR id <> $4)
            "#,
        )
        .bind(period.start())
        .bind(period.end())
        .bind(item_id.map(|id| *id.as_ref()))
        .bind(excluded.map(|id| *id.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        into_bookings(rows)
    }

    async fn find_last_by_item(
        con: &mut PgConnection,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = $1 AND end_date < $2
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(item_id.as_ref())
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_next_by_item(
        con: &mut PgConnection,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = $1 AND start_date > $2
            ORDER BY start_date
            LIMIT 1
            "#,
        )
        .bind(item_id.as_ref())
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_finished_by_item_and_booker(
        con: &mut PgConnection,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = $1 AND booker_id = $2 AND end_date < $3
            LIMIT 1
            "#,
        )
        .bind(item_id.as_ref())
        .bind(booker_id.as_ref())
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    /// Must be the first statement of the transaction.
    async fn lock_schedule(con: &mut PgConnection) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(con)
            .await
            .convert_error()?;
        Ok(())
    }

    async fn create(
        con: &mut PgConnection,
        booking: &BookingDraft,
    ) -> error_stack::Result<Booking, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, start_date, end_date, item_id, booker_id, status
            "#,
        )
        .bind(booking.start().as_ref())
        .bind(booking.end().as_ref())
        .bind(booking.item_id().as_ref())
        .bind(booking.booker_id().as_ref())
        .bind(BookingStatus::Waiting.as_str())
        .fetch_one(con)
        .await
        .convert_error()?;
        Booking::try_from(row)
    }

    async fn update(con: &mut PgConnection, booking: &Booking) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE bookings
            SET start_date = $2, end_date = $3, item_id = $4, booker_id = $5, status = $6
            WHERE id = $1
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.start().as_ref())
        .bind(booking.end().as_ref())
        .bind(booking.item_id().as_ref())
        .bind(booking.booker_id().as_ref())
        .bind(booking.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        booking_id: &BookingId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use error_stack::ResultExt;
    use time::{Duration, PrimitiveDateTime};

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookingQuery;
    use kernel::interface::update::{BookingModifier, ItemModifier, UserModifier};
    use kernel::prelude::entity::{
        local_now, BookingDraft, BookingEnd, BookingStart, BookingStatus, ItemAvailable,
        ItemDescription, ItemDraft, ItemId, ItemName, UserDraft, UserEmail, UserId, UserName,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookingRepository, PostgresDatabase, PostgresItemRepository,
        PostgresTransaction, PostgresUserRepository,
    };

    async fn user(con: &mut PostgresTransaction) -> error_stack::Result<UserId, KernelError> {
        let email = format!("booking{}@example.com", rand::random::<u32>());
        let user = PostgresUserRepository
            .create(con, &UserDraft::new(UserName::new("user"), UserEmail::new(email)))
            .await?;
        Ok(*user.id())
    }

    async fn item(
        con: &mut PostgresTransaction,
        owner: UserId,
    ) -> error_stack::Result<ItemId, KernelError> {
        let item = PostgresItemRepository
            .create(
                con,
                &ItemDraft::new(
                    ItemName::new("drill"),
                    ItemDescription::new("cordless"),
                    ItemAvailable::new(true),
                    owner,
                    None,
                ),
            )
            .await?;
        Ok(*item.id())
    }

    fn draft(item: ItemId, booker: UserId, start: PrimitiveDateTime, hours: i64) -> BookingDraft {
        BookingDraft::new(
            BookingStart::new(start),
            BookingEnd::new(start + Duration::hours(hours)),
            item,
            booker,
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_and_decide() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new()
            .await
            .change_context_lazy(|| KernelError::Internal)?;
        let mut connection = db.transact().await?;
        PostgresBookingRepository
            .lock_schedule(&mut connection)
            .await?;

        let owner = user(&mut connection).await?;
        let booker = user(&mut connection).await?;
        let item = item(&mut connection, owner).await?;
        let start = local_now() + Duration::days(365);

        let booking = PostgresBookingRepository
            .create(&mut connection, &draft(item, booker, start, 2))
            .await?;
        assert_eq!(*booking.status(), BookingStatus::Waiting);

        let booking = booking.reconstruct(|b| b.status = BookingStatus::Approved);
        PostgresBookingRepository
            .update(&mut connection, &booking)
            .await?;
        let found = PostgresBookingRepository
            .find_by_id(&mut connection, booking.id())
            .await?;
        assert_eq!(found, Some(booking.clone()));

        let owned = PostgresBookingRepository
            .find_by_owner(&mut connection, &owner)
            .await?;
        assert_eq!(owned, vec![booking.clone()]);

        PostgresBookingRepository
            .delete(&mut connection, booking.id())
            .await?;
        let found = PostgresBookingRepository
            .find_by_id(&mut connection, booking.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn overlap_candidates_respect_scope_and_exclusion() -> error_stack::Result<(), KernelError>
    {
        let db = PostgresDatabase::new()
            .await
            .change_context_lazy(|| KernelError::Internal)?;
        let mut connection = db.transact().await?;

        let owner = user(&mut connection).await?;
        let booker = user(&mut connection).await?;
        let first = item(&mut connection, owner).await?;
        let second = item(&mut connection, owner).await?;
        let start = local_now() + Duration::days(3650 + rand::random::<u16>() as i64);

        let existing = PostgresBookingRepository
            .create(&mut connection, &draft(first, booker, start, 4))
            .await?;
        let probe = draft(second, booker, start + Duration::hours(1), 1).period();

        let global = PostgresBookingRepository
            .find_overlapping(&mut connection, &probe, None, None)
            .await?;
        assert!(global.contains(&existing));

        let scoped = PostgresBookingRepository
            .find_overlapping(&mut connection, &probe, Some(&second), None)
            .await?;
        assert!(scoped.is_empty());

        let excluded = PostgresBookingRepository
            .find_overlapping(&mut connection, &probe, Some(&first), Some(existing.id()))
            .await?;
        assert!(excluded.is_empty());

        let touching = draft(first, booker, start + Duration::hours(4), 1).period();
        let adjacent = PostgresBookingRepository
            .find_overlapping(&mut connection, &touching, Some(&first), None)
            .await?;
        assert!(adjacent.is_empty());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn neighbouring_bookings_of_item() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new()
            .await
            .change_context_lazy(|| KernelError::Internal)?;
        let mut connection = db.transact().await?;

        let owner = user(&mut connection).await?;
        let booker = user(&mut connection).await?;
        let item = item(&mut connection, owner).await?;
        let now = local_now();

        let past = PostgresBookingRepository
            .create(&mut connection, &draft(item, booker, now - Duration::days(2), 2))
            .await?;
        let future = PostgresBookingRepository
            .create(&mut connection, &draft(item, booker, now + Duration::days(2), 2))
            .await?;

        let last = PostgresBookingRepository
            .find_last_by_item(&mut connection, &item, &now)
            .await?;
        assert_eq!(last, Some(past.clone()));
        let next = PostgresBookingRepository
            .find_next_by_item(&mut connection, &item, &now)
            .await?;
        assert_eq!(next, Some(future));
        let finished = PostgresBookingRepository
            .find_finished_by_item_and_booker(&mut connection, &item, &booker, &now)
            .await?;
        assert_eq!(finished, Some(past));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn concurrent_overlapping_creates_serialize() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new()
            .await
            .change_context_lazy(|| KernelError::Internal)?;

        let mut setup = db.transact().await?;
        let owner = user(&mut setup).await?;
        let booker = user(&mut setup).await?;
        let item = item(&mut setup, owner).await?;
        setup.commit().await?;

        let start = local_now() + Duration::days(7300 + rand::random::<u16>() as i64);
        let requested = draft(item, booker, start, 2);
        let shifted = draft(item, booker, start + Duration::hours(1), 2);

        let mut first = db.transact().await?;
        let mut second = db.transact().await?;
        for con in [&mut first, &mut second] {
            PostgresBookingRepository.lock_schedule(con).await?;
            let overlapping = PostgresBookingRepository
                .find_overlapping(con, &requested.period(), Some(&item), None)
                .await?;
            assert!(overlapping.is_empty());
        }

        let created_first = PostgresBookingRepository.create(&mut first, &requested).await;
        let created_second = PostgresBookingRepository.create(&mut second, &shifted).await;
        let first = match created_first {
            Ok(_) => first.commit().await,
            Err(e) => Err(e),
        };
        let second = match created_second {
            Ok(_) => second.commit().await,
            Err(e) => Err(e),
        };

        let mut cleanup = db.transact().await?;
        PostgresUserRepository.delete(&mut cleanup, &owner).await?;
        PostgresUserRepository.delete(&mut cleanup, &booker).await?;
        cleanup.commit().await?;

        let failures = [first, second]
            .into_iter()
            .filter_map(Result::err)
            .collect::<Vec<_>>();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0].current_context(),
            KernelError::Concurrency
        ));
        Ok(())
    }
}
