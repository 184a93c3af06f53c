//! [`Command`] for restoring a persisted [`Session`].

use std::convert::Infallible;

use crate::{domain::seller::Session, infra::Storage, Service};

use super::Command;

/// [`Command`] for restoring the [`Session`] persisted by a previous
/// run.
///
/// Executed once at startup, before the first navigation resolves.
/// Infallible: unreadable or partial persisted state yields the empty
/// [`Session`], never an error.
#[derive(Clone, Copy, Debug)]
pub struct RehydrateSession;

impl<Api, S: Storage> Command<RehydrateSession> for Service<Api, S> {
    type Ok = Option<Session>;
    type Err = Infallible;

    async fn execute(
        &self,
        _: RehydrateSession,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.session().rehydrate())
    }
}
