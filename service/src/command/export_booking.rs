//! [`Command`] for exporting a [`Booking`].
//!
//! [`Booking`]: crate::domain::Booking

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use url::Url;

use crate::{
    domain::booking::{self, ExportFormat},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for exporting a [`Booking`] in the given [`ExportFormat`].
///
/// Rendering is delegated to the backend entirely: the resolved [`Url`]
/// is meant to be opened, not fetched and parsed.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug)]
pub struct ExportBooking {
    /// ID of the [`Booking`] to export.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub id: booking::Id,

    /// [`ExportFormat`] to export in.
    pub format: ExportFormat,
}

impl<Api, S> Command<ExportBooking> for Service<Api, S>
where
    Api: Gateway<
            Select<By<Url, (booking::Id, ExportFormat)>>,
            Ok = Url,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = Url;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ExportBooking,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Select(By::new((cmd.id, cmd.format))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`ExportBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),
}
