use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    NotFound,
    Validation,
    Conflict,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Requested resource was not found"),
            KernelError::Validation => write!(f, "Request violates a business rule"),
            KernelError::Conflict => write!(f, "Resource already exists"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
