mod booking;
mod comment;
mod common;
mod item;
mod request;
mod user;

pub use self::{booking::*, comment::*, common::*, item::*, request::*, user::*};
