mod booking;
mod item;
mod lookup;
mod request;
mod user;

pub use self::{booking::*, item::*, request::*, user::*};
