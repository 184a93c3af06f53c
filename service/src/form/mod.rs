//! Editable form state definitions.

pub mod booking;

pub use self::booking::{BookingDraft, BookingForm};
