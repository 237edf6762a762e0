use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresBookingRepository, PostgresCommentRepository, PostgresDatabase,
    PostgresItemRepository, PostgresItemRequestRepository, PostgresUserRepository,
};
use error_stack::ResultExt;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::policy::{BookingPolicy, DependOnBookingPolicy};
use kernel::interface::query::{
    DependOnBookingQuery, DependOnCommentQuery, DependOnItemQuery, DependOnItemRequestQuery,
    DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookingModifier, DependOnCommentModifier, DependOnItemModifier,
    DependOnItemRequestModifier, DependOnUserModifier,
};
use kernel::KernelError;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(policy: BookingPolicy) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(policy).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    policy: BookingPolicy,
    users: PostgresUserRepository,
    items: PostgresItemRepository,
    bookings: PostgresBookingRepository,
    requests: PostgresItemRequestRepository,
    comments: PostgresCommentRepository,
}

impl Handler {
    pub async fn init(policy: BookingPolicy) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new()
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to prepare the database")?;
        tracing::info!(
            "booking overlap rule {:?} in {:?} scope",
            policy.rule(),
            policy.scope()
        );

        Ok(Self {
            pgpool,
            policy,
            users: PostgresUserRepository,
            items: PostgresItemRepository,
            bookings: PostgresBookingRepository,
            requests: PostgresItemRequestRepository,
            comments: PostgresCommentRepository,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self.pgpool()
    }
}

impl DependOnBookingPolicy for Handler {
    fn booking_policy(&self) -> &BookingPolicy {
        self.policy()
    }
}

macro_rules! depend_on_repository {
    ($($depend:ident :: $ty:ident = $repository:ty => $accessor:ident($field:ident)),* $(,)?) => {
        $(
            impl $depend for Handler {
                type $ty = $repository;
                fn $accessor(&self) -> &Self::$ty {
                    self.$field()
                }
            }
        )*
    };
}

depend_on_repository!(
    DependOnUserQuery::UserQuery = PostgresUserRepository => user_query(users),
    DependOnUserModifier::UserModifier = PostgresUserRepository => user_modifier(users),
    DependOnItemQuery::ItemQuery = PostgresItemRepository => item_query(items),
    DependOnItemModifier::ItemModifier = PostgresItemRepository => item_modifier(items),
    DependOnBookingQuery::BookingQuery = PostgresBookingRepository => booking_query(bookings),
    DependOnBookingModifier::BookingModifier = PostgresBookingRepository => booking_modifier(bookings),
    DependOnItemRequestQuery::ItemRequestQuery = PostgresItemRequestRepository => item_request_query(requests),
    DependOnItemRequestModifier::ItemRequestModifier = PostgresItemRequestRepository => item_request_modifier(requests),
    DependOnCommentQuery::CommentQuery = PostgresCommentRepository => comment_query(comments),
    DependOnCommentModifier::CommentModifier = PostgresCommentRepository => comment_modifier(comments),
);
