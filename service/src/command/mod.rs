//! [`Command`] definition.

pub mod change_password;
pub mod create_booking;
pub mod create_seller;
pub mod create_session;
pub mod delete_booking;
pub mod delete_seller;
pub mod destroy_session;
pub mod export_booking;
pub mod rehydrate_session;
pub mod update_booking;
pub mod update_profile;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    change_password::ChangePassword, create_booking::CreateBooking,
    create_seller::CreateSeller, create_session::CreateSession,
    delete_booking::DeleteBooking, delete_seller::DeleteSeller,
    destroy_session::DestroySession, export_booking::ExportBooking,
    rehydrate_session::RehydrateSession, update_booking::UpdateBooking,
    update_profile::UpdateProfile,
};
