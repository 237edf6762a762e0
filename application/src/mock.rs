//! In-memory implementations of every kernel interface, used by the service
//! tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use error_stack::Report;
use time::PrimitiveDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::{BookingPolicy, DependOnBookingPolicy};
use kernel::interface::query::{
    BookingQuery, CommentQuery, DependOnBookingQuery, DependOnCommentQuery, DependOnItemQuery,
    DependOnItemRequestQuery, DependOnUserQuery, ItemQuery, ItemRequestQuery, UserQuery,
};
use kernel::interface::update::{
    BookingModifier, CommentModifier, DependOnBookingModifier, DependOnCommentModifier,
    DependOnItemModifier, DependOnItemRequestModifier, DependOnUserModifier, ItemModifier,
    ItemRequestModifier, UserModifier,
};
use kernel::prelude::entity::{
    Booking, BookingDraft, BookingEnd, BookingId, BookingPeriod, BookingStart, BookingStatus,
    Comment, CommentDraft, CommentId, DestructBookingDraft, DestructCommentDraft,
    DestructItemDraft, DestructItemRequestDraft, DestructUserDraft, Item, ItemAvailable,
    ItemDescription, ItemDraft, ItemId, ItemName, ItemRequest, ItemRequestDraft, ItemRequestId,
    SelectLimit, SelectOffset, User, UserDraft, UserEmail, UserId, UserName,
};
use kernel::KernelError;

#[derive(Default)]
struct Tables {
    sequence: i64,
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    bookings: BTreeMap<i64, Booking>,
    requests: BTreeMap<i64, ItemRequest>,
    comments: BTreeMap<i64, Comment>,
    rollbacks: usize,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
}

#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<Tables>>,
}

impl MockStore {
    fn tables(&self) -> error_stack::Result<MutexGuard<'_, Tables>, KernelError> {
        self.tables.lock().map_err(|_| {
            Report::new(KernelError::Internal).attach_printable("Mock store lock poisoned")
        })
    }
}

/// Writes apply immediately; only explicit roll backs are counted.
pub struct MockTransaction(MockStore);

#[async_trait::async_trait]
impl Transaction for MockTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.tables()?.rollbacks += 1;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MockStore {
    type Transaction = MockTransaction;
    async fn transact(&self) -> error_stack::Result<MockTransaction, KernelError> {
        Ok(MockTransaction(self.clone()))
    }
}

#[async_trait::async_trait]
impl UserQuery for MockStore {
    type Transaction = MockTransaction;

    async fn find_by_id(
        &self,
        _con: &mut MockTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(self.tables()?.users.get(id.as_ref()).cloned())
    }

    async fn find_all(&self, _con: &mut MockTransaction) -> error_stack::Result<Vec<User>, KernelError> {
        Ok(self.tables()?.users.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl UserModifier for MockStore {
    type Transaction = MockTransaction;

    async fn create(
        &self,
        _con: &mut MockTransaction,
        user: &UserDraft,
    ) -> error_stack::Result<User, KernelError> {
        let mut tables = self.tables()?;
        let DestructUserDraft { name, email } = user.clone().into_destruct();
        if tables.users.values().any(|user| user.email() == &email) {
            return Err(Report::new(KernelError::Conflict).attach_printable("Email already in use"));
        }
        let id = tables.next_id();
        let user = User::new(UserId::new(id), name, email);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, _con: &mut MockTransaction, user: &User) -> error_stack::Result<(), KernelError> {
        let mut tables = self.tables()?;
        if tables
            .users
            .values()
            .any(|other| other.id() != user.id() && other.email() == user.email())
        {
            return Err(Report::new(KernelError::Conflict).attach_printable("Email already in use"));
        }
        tables.users.insert(*user.id().as_ref(), user.clone());
        Ok(())
    }

    async fn delete(&self, _con: &mut MockTransaction, user_id: &UserId) -> error_stack::Result<(), KernelError> {
        self.tables()?.users.remove(user_id.as_ref());
        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemQuery for MockStore {
    type Transaction = MockTransaction;

    async fn find_by_id(
        &self,
        _con: &mut MockTransaction,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        Ok(self.tables()?.items.get(id.as_ref()).cloned())
    }

    async fn find_by_owner(
        &self,
        _con: &mut MockTransaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        Ok(self
            .tables()?
            .items
            .values()
            .filter(|item| item.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn search(&self, _con: &mut MockTransaction, text: &str) -> error_stack::Result<Vec<Item>, KernelError> {
        let text = text.to_lowercase();
        Ok(self
            .tables()?
            .items
            .values()
            .filter(|item| *item.available().as_ref())
            .filter(|item| {
                item.name().as_ref().to_lowercase().contains(&text)
                    || item.description().as_ref().to_lowercase().contains(&text)
            })
            .cloned()
            .collect())
    }

    async fn find_by_request(
        &self,
        _con: &mut MockTransaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        Ok(self
            .tables()?
            .items
            .values()
            .filter(|item| item.request_id().as_ref() == Some(request_id))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ItemModifier for MockStore {
    type Transaction = MockTransaction;

    async fn create(&self, _con: &mut MockTransaction, item: &ItemDraft) -> error_stack::Result<Item, KernelError> {
        let mut tables = self.tables()?;
        let DestructItemDraft {
            name,
            description,
            available,
            owner_id,
            request_id,
        } = item.clone().into_destruct();
        let id = tables.next_id();
        let item = Item::new(ItemId::new(id), name, description, available, owner_id, request_id);
        tables.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, _con: &mut MockTransaction, item: &Item) -> error_stack::Result<(), KernelError> {
        self.tables()?.items.insert(*item.id().as_ref(), item.clone());
        Ok(())
    }

    async fn delete(&self, _con: &mut MockTransaction, item_id: &ItemId) -> error_stack::Result<(), KernelError> {
        self.tables()?.items.remove(item_id.as_ref());
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingQuery for MockStore {
    type Transaction = MockTransaction;

    async fn find_by_id(
        &self,
        _con: &mut MockTransaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(self.tables()?.bookings.get(id.as_ref()).cloned())
    }

    async fn find_by_booker(
        &self,
        _con: &mut MockTransaction,
        booker_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        Ok(self
            .tables()?
            .bookings
            .values()
            .filter(|booking| booking.is_booked_by(booker_id))
            .cloned()
            .collect())
    }

    async fn find_by_owner(
        &self,
        _con: &mut MockTransaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let tables = self.tables()?;
        Ok(tables
            .bookings
            .values()
            .filter(|booking| {
                tables
                    .items
                    .get(booking.item_id().as_ref())
                    .is_some_and(|item| item.is_owned_by(owner_id))
            })
            .cloned()
            .collect())
    }

    async fn find_overlapping(
        &self,
        _con: &mut MockTransaction,
        period: &BookingPeriod,
        item_id: Option<&ItemId>,
        excluded: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        Ok(self
            .tables()?
            .bookings
            .values()
            .filter(|booking| booking.period().intersects(period))
            .filter(|booking| item_id.map_or(true, |item_id| booking.item_id() == item_id))
            .filter(|booking| excluded.map_or(true, |excluded| booking.id() != excluded))
            .cloned()
            .collect())
    }

    async fn find_last_by_item(
        &self,
        _con: &mut MockTransaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(self
            .tables()?
            .bookings
            .values()
            .filter(|booking| booking.item_id() == item_id && booking.end().as_ref() < now)
            .max_by_key(|booking| *booking.end())
            .cloned())
    }

    async fn find_next_by_item(
        &self,
        _con: &mut MockTransaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(self
            .tables()?
            .bookings
            .values()
            .filter(|booking| booking.item_id() == item_id && booking.start().as_ref() > now)
            .min_by_key(|booking| *booking.start())
            .cloned())
    }

    async fn find_finished_by_item_and_booker(
        &self,
        _con: &mut MockTransaction,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(self
            .tables()?
            .bookings
            .values()
            .find(|booking| {
                booking.item_id() == item_id
                    && booking.is_booked_by(booker_id)
                    && booking.end().as_ref() < now
            })
            .cloned())
    }
}

#[async_trait::async_trait]
impl BookingModifier for MockStore {
    type Transaction = MockTransaction;

    async fn lock_schedule(&self, _con: &mut MockTransaction) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn create(
        &self,
        _con: &mut MockTransaction,
        booking: &BookingDraft,
    ) -> error_stack::Result<Booking, KernelError> {
        let mut tables = self.tables()?;
        let DestructBookingDraft {
            start,
            end,
            item_id,
            booker_id,
        } = booking.clone().into_destruct();
        let id = tables.next_id();
        let booking = Booking::new(
            BookingId::new(id),
            start,
            end,
            item_id,
            booker_id,
            BookingStatus::Waiting,
        );
        tables.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn update(&self, _con: &mut MockTransaction, booking: &Booking) -> error_stack::Result<(), KernelError> {
        self.tables()?
            .bookings
            .insert(*booking.id().as_ref(), booking.clone());
        Ok(())
    }

    async fn delete(&self, _con: &mut MockTransaction, booking_id: &BookingId) -> error_stack::Result<(), KernelError> {
        self.tables()?.bookings.remove(booking_id.as_ref());
        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemRequestQuery for MockStore {
    type Transaction = MockTransaction;

    async fn find_by_id(
        &self,
        _con: &mut MockTransaction,
        id: &ItemRequestId,
    ) -> error_stack::Result<Option<ItemRequest>, KernelError> {
        Ok(self.tables()?.requests.get(id.as_ref()).cloned())
    }

    async fn find_by_requestor(
        &self,
        _con: &mut MockTransaction,
        requestor_id: &UserId,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        let mut requests = self
            .tables()?
            .requests
            .values()
            .filter(|request| request.requestor_id() == requestor_id)
            .cloned()
            .collect::<Vec<_>>();
        requests.sort_by_key(|request| *request.created().as_ref());
        Ok(requests)
    }

    async fn find_by_other_requestors(
        &self,
        _con: &mut MockTransaction,
        requestor_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        let mut requests = self
            .tables()?
            .requests
            .values()
            .filter(|request| request.requestor_id() != requestor_id)
            .cloned()
            .collect::<Vec<_>>();
        requests.sort_by_key(|request| std::cmp::Reverse(*request.created().as_ref()));
        Ok(requests
            .into_iter()
            .skip(*offset.as_ref() as usize)
            .take(*limit.as_ref() as usize)
            .collect())
    }
}

#[async_trait::async_trait]
impl ItemRequestModifier for MockStore {
    type Transaction = MockTransaction;

    async fn create(
        &self,
        _con: &mut MockTransaction,
        request: &ItemRequestDraft,
    ) -> error_stack::Result<ItemRequest, KernelError> {
        let mut tables = self.tables()?;
        let DestructItemRequestDraft {
            description,
            requestor_id,
            created,
        } = request.clone().into_destruct();
        let id = tables.next_id();
        let request = ItemRequest::new(ItemRequestId::new(id), description, requestor_id, created);
        tables.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn delete(
        &self,
        _con: &mut MockTransaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<(), KernelError> {
        self.tables()?.requests.remove(request_id.as_ref());
        Ok(())
    }
}

#[async_trait::async_trait]
impl CommentQuery for MockStore {
    type Transaction = MockTransaction;

    async fn find_by_item(
        &self,
        _con: &mut MockTransaction,
        item_id: &ItemId,
    ) -> error_stack::Result<Vec<Comment>, KernelError> {
        Ok(self
            .tables()?
            .comments
            .values()
            .filter(|comment| comment.item_id() == item_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl CommentModifier for MockStore {
    type Transaction = MockTransaction;

    async fn create(
        &self,
        _con: &mut MockTransaction,
        comment: &CommentDraft,
    ) -> error_stack::Result<Comment, KernelError> {
        let mut tables = self.tables()?;
        let DestructCommentDraft {
            text,
            item_id,
            author_id,
            created,
        } = comment.clone().into_destruct();
        let id = tables.next_id();
        let comment = Comment::new(CommentId::new(id), text, item_id, author_id, created);
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }
}

/// Wires one [`MockStore`] behind every dependency a service can ask for.
#[derive(Clone, Default)]
pub struct MockModule {
    store: MockStore,
    policy: BookingPolicy,
}

impl MockModule {
    pub fn new(policy: BookingPolicy) -> Self {
        Self {
            store: MockStore::default(),
            policy,
        }
    }

    pub fn add_user(&self, name: &str) -> UserId {
        let mut tables = self.store.tables.lock().unwrap();
        let id = tables.next_id();
        tables.users.insert(
            id,
            User::new(
                UserId::new(id),
                UserName::new(name),
                UserEmail::new(format!("{name}@example.com")),
            ),
        );
        UserId::new(id)
    }

    pub fn add_item(&self, owner: UserId, available: bool) -> ItemId {
        let mut tables = self.store.tables.lock().unwrap();
        let id = tables.next_id();
        tables.items.insert(
            id,
            Item::new(
                ItemId::new(id),
                ItemName::new(format!("item {id}")),
                ItemDescription::new("a thing to borrow"),
                ItemAvailable::new(available),
                owner,
                None,
            ),
        );
        ItemId::new(id)
    }

    pub fn add_booking(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        status: BookingStatus,
    ) -> BookingId {
        let mut tables = self.store.tables.lock().unwrap();
        let id = tables.next_id();
        tables.bookings.insert(
            id,
            Booking::new(
                BookingId::new(id),
                BookingStart::new(start),
                BookingEnd::new(end),
                item_id,
                booker_id,
                status,
            ),
        );
        BookingId::new(id)
    }

    pub fn booking(&self, id: BookingId) -> Option<Booking> {
        self.store.tables.lock().unwrap().bookings.get(id.as_ref()).cloned()
    }

    pub fn booking_count(&self) -> usize {
        self.store.tables.lock().unwrap().bookings.len()
    }

    pub fn rollback_count(&self) -> usize {
        self.store.tables.lock().unwrap().rollbacks
    }
}

impl DependOnDatabaseConnection for MockModule {
    type DatabaseConnection = MockStore;
    fn database_connection(&self) -> &MockStore {
        &self.store
    }
}

impl DependOnBookingPolicy for MockModule {
    fn booking_policy(&self) -> &BookingPolicy {
        &self.policy
    }
}

macro_rules! depend_on_store {
    ($($depend:ident :: $ty:ident => $accessor:ident),* $(,)?) => {
        $(
            impl $depend for MockModule {
                type $ty = MockStore;
                fn $accessor(&self) -> &MockStore {
                    &self.store
                }
            }
        )*
    };
}

depend_on_store!(
    DependOnUserQuery::UserQuery => user_query,
    DependOnItemQuery::ItemQuery => item_query,
    DependOnBookingQuery::BookingQuery => booking_query,
    DependOnItemRequestQuery::ItemRequestQuery => item_request_query,
    DependOnCommentQuery::CommentQuery => comment_query,
    DependOnUserModifier::UserModifier => user_modifier,
    DependOnItemModifier::ItemModifier => item_modifier,
    DependOnBookingModifier::BookingModifier => booking_modifier,
    DependOnItemRequestModifier::ItemRequestModifier => item_request_modifier,
    DependOnCommentModifier::CommentModifier => comment_modifier,
);
