//! [`Command`] for signing a [`Seller`] in.

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        seller::{session::Token, Credentials, Session},
        Seller,
    },
    infra::{gateway, Gateway, Storage},
    session, Service,
};

use super::Command;

/// [`Command`] for signing a [`Seller`] in with its [`Credentials`].
#[derive(Debug, From)]
pub struct CreateSession(pub Credentials);

impl<Api, S> Command<CreateSession> for Service<Api, S>
where
    Api: Gateway<
            Perform<Credentials>,
            Ok = (Seller, Token),
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateSession(credentials): CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let (seller, token) = self
            .api()
            .execute(Perform(credentials))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // The session becomes visible only once it's durably persisted.
        self.session()
            .login(seller, token)
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Session`] cannot be persisted.
    #[display("cannot persist the `Session`: {_0}")]
    Store(session::LoginError),
}
