mod booking;
mod item;
mod request;
mod user;

pub use self::{booking::*, item::*, request::*, user::*};
