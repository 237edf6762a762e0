use std::env::VarError;
use std::str::FromStr;

use error_stack::Report;
use kernel::interface::policy::{BookingPolicy, OverlapRule, OverlapScope};
use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
static BOOKING_OVERLAP_RULE: &str = "BOOKING_OVERLAP_RULE";
static BOOKING_OVERLAP_SCOPE: &str = "BOOKING_OVERLAP_SCOPE";

const DEFAULT_PORT: u16 = 8080;

/// Settings read from the environment (and `.env`) at startup.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub port: u16,
    pub policy: BookingPolicy,
}

impl Config {
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = optional::<u16>(SERVER_PORT)?.unwrap_or(DEFAULT_PORT);
        let rule = optional::<OverlapRule>(BOOKING_OVERLAP_RULE)?.unwrap_or_default();
        let scope = optional::<OverlapScope>(BOOKING_OVERLAP_SCOPE)?.unwrap_or_default();
        Ok(Self {
            port,
            policy: BookingPolicy::new(rule, scope),
        })
    }
}

fn optional<T>(key: &str) -> error_stack::Result<Option<T>, KernelError>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    let value = match dotenvy::var(key) {
        Ok(value) => value,
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => return Ok(None),
        Err(e) => {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Failed to read {key}: {e}")))
        }
    };
    value.parse::<T>().map(Some).map_err(|e| {
        Report::new(KernelError::Internal)
            .attach_printable(format!("Invalid {key}={value}: {e:?}"))
    })
}
