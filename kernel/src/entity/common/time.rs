use std::marker::PhantomData;

use time::{OffsetDateTime, PrimitiveDateTime};
use vodca::{AsRefln, Fromln};

/// Wall-clock "now" as a local date-time without offset. Every timestamp in
/// the service is interpreted as UTC wall-clock time.
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct CreatedAt<T>(PrimitiveDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}
