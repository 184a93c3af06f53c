//! Domain model definitions.

pub mod booking;
pub mod phone;
pub mod seller;

pub use self::{booking::Booking, phone::PhoneNumber, seller::Seller};
