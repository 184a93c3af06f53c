//! [`Command`] for removing a [`Seller`].
//!
//! [`Seller`]: crate::domain::Seller

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::seller::Session;
use crate::{
    domain::{
        seller::{self, Role},
        Seller,
    },
    infra::{gateway, Gateway, Storage},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Seller`] from the directory.
///
/// Reserved for admins. An admin removing its own account destroys the
/// active [`Session`], since the persisted identity no longer exists.
///
/// [`Seller`]: crate::domain::Seller
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteSeller(pub seller::Id);

impl<Api, S> Command<DeleteSeller> for Service<Api, S>
where
    Api: Gateway<
            Delete<By<Seller, seller::Id>>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteSeller(id): DeleteSeller,
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
            Role::Staff => return Err(tracerr::new!(E::Forbidden(id))),
        }

        self.api()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if actor.id == id {
            self.session().logout();
        }
        Ok(())
    }
}

/// Error of [`DeleteSeller`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Non-admin actor tried to remove a [`Seller`].
    ///
    /// [`Seller`]: crate::domain::Seller
    #[display("cannot remove `Seller(id: {_0})`")]
    #[from(ignore)]
    Forbidden(#[error(not(source))] seller::Id),

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
    use common::operations::{By, Delete};
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

    use super::{DeleteSeller, ExecutionError};

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

    /// [`Gateway`] double acknowledging any removal.
    struct Acking;

    impl Gateway<Delete<By<Seller, seller::Id>>> for Acking {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Delete<By<Seller, seller::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn staff_cannot_remove_sellers() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        let res = service.execute(DeleteSeller(7.into())).await;

        match res {
            Err(e) => match e.as_ref() {
                ExecutionError::Forbidden(id) => assert_eq!(*id, 7.into()),
                other @ (ExecutionError::Gateway(_)
                | ExecutionError::NotAuthenticated) => {
                    panic!("expected `Forbidden`, got {other:?}")
                }
            },
            Ok(()) => panic!("expected `Forbidden`, got `Ok`"),
        }
        assert!(service.session().current().is_some());
    }

    #[tokio::test]
    async fn admin_removing_other_seller_keeps_session() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(1, Role::Admin), Token::from("t"))
                .unwrap(),
        );

        service.execute(DeleteSeller(42.into())).await.unwrap();
        assert!(service.session().current().is_some());
    }

    #[tokio::test]
    async fn admin_removing_itself_destroys_session() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(1, Role::Admin), Token::from("t"))
                .unwrap(),
        );

        service.execute(DeleteSeller(1.into())).await.unwrap();
        assert_eq!(service.session().current(), None);
    }
}
