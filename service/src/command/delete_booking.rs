//! [`Command`] for deleting a [`Booking`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Booking`] by its ID.
///
/// Authorization is enforced by the backend: a foreign or missing
/// [`Booking`] surfaces as a [`gateway::Error::Rejected`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteBooking(pub booking::Id);

impl<Api, S> Command<DeleteBooking> for Service<Api, S>
where
    Api: Gateway<
            Delete<By<Booking, booking::Id>>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteBooking(id): DeleteBooking,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`DeleteBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),
}
