//! [`Command`] for registering a new [`Seller`].
//!
//! [`Seller`]: crate::domain::Seller

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::seller::{self, Role},
    infra::{gateway, Gateway, Storage},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Seller`] out of a [`Draft`].
///
/// Reserved for admins; staff cannot grow the directory.
///
/// [`Draft`]: seller::Draft
/// [`Seller`]: crate::domain::Seller
#[derive(Clone, Debug, From)]
pub struct CreateSeller(pub seller::Draft);

impl<Api, S> Command<CreateSeller> for Service<Api, S>
where
    Api: Gateway<Insert<seller::Draft>, Ok = (), Err = Traced<gateway::Error>>,
    S: Storage,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateSeller(draft): CreateSeller,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let actor = self
            .session()
            .current()
            .ok_or(E::NotAuthenticated)
            .map_err(tracerr::wrap!())?
            .seller;
        match actor.role {
            Role::Admin => {}
            Role::Staff => return Err(tracerr::new!(E::Forbidden)),
        }

        self.api()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateSeller`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Non-admin actor tried to register a [`Seller`].
    ///
    /// [`Seller`]: crate::domain::Seller
    #[display("only admins may register sellers")]
    Forbidden,

    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// No [`Seller`] is signed in.
    ///
    /// [`Seller`]: crate::domain::Seller
    #[display("no `Seller` is signed in")]
    NotAuthenticated,
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;
    use tracerr::Traced;

    use crate::{
        domain::{
            seller::{self, session::Token, Role},
            Seller,
        },
        infra::{gateway, storage::Memory, Gateway},
        session::Store,
        Command as _, Service,
    };

    use super::{CreateSeller, ExecutionError};

    fn seller(id: i64, role: Role) -> Seller {
        serde_json::from_str(&format!(
            r#"{{
                "id": {id},
                "fullName": "Test Seller",
                "email": "a@travel.vn",
                "role": "{role}"
            }}"#,
        ))
        .unwrap()
    }

    fn draft() -> seller::Draft {
        seller::Draft {
            full_name: "New Seller".parse().unwrap(),
            email: "new@travel.vn".parse().unwrap(),
            phone_number: None,
        }
    }

    /// [`Gateway`] double acknowledging any draft.
    struct Acking;

    impl Gateway<Insert<seller::Draft>> for Acking {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Insert<seller::Draft>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn staff_cannot_register_sellers() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        let res = service.execute(CreateSeller(draft())).await;

        match res {
            Err(e) => match e.as_ref() {
                ExecutionError::Forbidden => {}
                other @ (ExecutionError::Gateway(_)
                | ExecutionError::NotAuthenticated) => {
                    panic!("expected `Forbidden`, got {other:?}")
                }
            },
            Ok(()) => panic!("expected `Forbidden`, got `Ok`"),
        }
    }

    #[tokio::test]
    async fn admin_registers_a_seller() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(1, Role::Admin), Token::from("t"))
                .unwrap(),
        );

        service.execute(CreateSeller(draft())).await.unwrap();
        assert!(service.session().current().is_some());
    }

    #[tokio::test]
    async fn signed_out_actor_is_rejected() {
        let service = Service::new(Acking, Store::new(Memory::default()));

        let res = service.execute(CreateSeller(draft())).await;

        match res {
            Err(e) => match e.as_ref() {
                ExecutionError::NotAuthenticated => {}
                other @ (ExecutionError::Forbidden
                | ExecutionError::Gateway(_)) => {
                    panic!("expected `NotAuthenticated`, got {other:?}")
                }
            },
            Ok(()) => panic!("expected `NotAuthenticated`, got `Ok`"),
        }
    }
}
