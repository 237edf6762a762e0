use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i64);

impl SelectLimit {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectLimit(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i64);

impl SelectOffset {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectOffset(value.into())
    }
}

/// A validated `from`/`size` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: SelectOffset,
    limit: SelectLimit,
}

impl Pagination {
    /// Both bounds must be non-negative when present. A window only exists
    /// when both of them are supplied.
    pub fn new(
        from: Option<i64>,
        size: Option<i64>,
    ) -> error_stack::Result<Option<Self>, KernelError> {
        if from.is_some_and(|from| from < 0) || size.is_some_and(|size| size < 0) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Pagination parameters must not be negative"));
        }
        Ok(from.zip(size).map(|(from, size)| Self {
            offset: SelectOffset::new(from),
            limit: SelectLimit::new(size),
        }))
    }

    pub fn offset(&self) -> &SelectOffset {
        &self.offset
    }

    pub fn limit(&self) -> &SelectLimit {
        &self.limit
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset.0).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit.0).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}
