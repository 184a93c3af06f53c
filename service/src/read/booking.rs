//! [`Booking`] read model definition.
//!
//! [`Booking`]: crate::domain::Booking

use crate::domain::{seller, Seller};

/// Scope of a [`Booking`] listing.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Filter {
    /// Every booking, whoever it belongs to.
    All,

    /// Only bookings of the given [`Seller`].
    BySeller(seller::Id),
}

impl Filter {
    /// Returns the [`Filter`] the given `actor` is allowed to list with:
    /// staff always sees only its own bookings.
    #[must_use]
    pub fn for_actor(actor: &Seller) -> Self {
        match actor.role {
            seller::Role::Admin => Self::All,
            seller::Role::Staff => Self::BySeller(actor.id),
        }
    }
}
