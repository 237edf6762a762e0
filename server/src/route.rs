use axum::http::{HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};
use error_stack::Report;
use kernel::KernelError;

pub use self::{
    booking::BookingRouter, item::ItemRouter, request::ItemRequestRouter, user::UserRouter,
};

mod booking;
mod item;
mod request;
mod user;

static SHARER_USER_ID: HeaderName = HeaderName::from_static("x-sharer-user-id");

/// The caller's user id, carried by every request except the user directory.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SharerUserId(i64);

impl SharerUserId {
    pub fn id(&self) -> i64 {
        self.0
    }
}

impl Header for SharerUserId {
    fn name() -> &'static HeaderName {
        &SHARER_USER_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        values.extend(std::iter::once(HeaderValue::from(self.0)));
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, Report<KernelError>> {
    value.ok_or_else(|| {
        Report::new(KernelError::Validation).attach_printable(format!("{field} must be set"))
    })
}
