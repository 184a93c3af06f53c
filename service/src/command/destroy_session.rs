//! [`Command`] for signing the current [`Seller`] out.
//!
//! [`Seller`]: crate::domain::Seller

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::seller::Session;
use crate::{infra::Storage, Service};

use super::Command;

/// [`Command`] for destroying the current [`Session`].
///
/// Idempotent and infallible: destroying an absent [`Session`] is a
/// no-op, and storage failures degrade to the in-memory reset.
#[derive(Clone, Copy, Debug)]
pub struct DestroySession;

impl<Api, S: Storage> Command<DestroySession> for Service<Api, S> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        _: DestroySession,
    ) -> Result<Self::Ok, Self::Err> {
        self.session().logout();
        Ok(())
    }
}
