use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Accepts `local@domain` shaped addresses only.
    pub fn parse(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into();
        match email.split_once('@') {
            Some((local, domain)) if !local.trim().is_empty() && !domain.trim().is_empty() => {
                Ok(Self(email))
            }
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Malformed email address: {email}"))),
        }
    }
}
