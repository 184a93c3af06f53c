//! [`Command`] for updating a [`Booking`].
//!
//! [`Booking`]: crate::domain::Booking

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::booking,
    form::{booking::FieldError, BookingDraft, BookingForm},
    infra::{gateway, Gateway, Storage},
    Service,
};

use super::Command;

/// [`Command`] for replacing an existing [`Booking`] with the validated
/// contents of a [`BookingForm`].
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Debug)]
pub struct UpdateBooking {
    /// ID of the [`Booking`] to update.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub id: booking::Id,

    /// [`BookingForm`] holding the edited values.
    pub form: BookingForm,
}

impl<Api, S> Command<UpdateBooking> for Service<Api, S>
where
    Api: Gateway<
            Update<(booking::Id, BookingDraft)>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let actor = self
            .session()
            .current()
            .ok_or(E::NotAuthenticated)
            .map_err(tracerr::wrap!())?
            .seller;

        let draft = cmd
            .form
            .validate(&actor)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.api()
            .execute(Update((cmd.id, draft)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`BookingForm`] failed validation, nothing was submitted.
    #[display("booking form is invalid")]
    Invalid(#[error(not(source))] Vec<FieldError>),

    /// No [`Seller`] is signed in.
    ///
    /// [`Seller`]: crate::domain::Seller
    #[display("no `Seller` is signed in")]
    NotAuthenticated,
}
