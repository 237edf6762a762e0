mod booking;
mod comment;
mod item;
mod request;
mod user;

pub use self::{booking::*, comment::*, item::*, request::*, user::*};
