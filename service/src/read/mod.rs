//! Read model definitions.

pub mod booking;
pub mod dashboard;
