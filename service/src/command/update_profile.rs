//! [`Command`] for updating a [`Seller`] profile.
//!
//! [`Seller`]: crate::domain::Seller

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::seller::Session;
use crate::{
    domain::seller::{self, Role},
    infra::{gateway, Gateway, Storage},
    Service,
};

use super::Command;

/// [`Command`] for replacing a [`Seller`] profile with a [`Patch`].
///
/// Staff may patch only its own profile; admins may patch anyone's.
/// Patching the signed-in profile destroys the active [`Session`], since
/// the persisted copy no longer matches the stored one.
///
/// [`Patch`]: seller::Patch
/// [`Seller`]: crate::domain::Seller
#[derive(Clone, Debug)]
pub struct UpdateProfile {
    /// ID of the [`Seller`] to patch.
    ///
    /// [`Seller`]: crate::domain::Seller
    pub seller_id: seller::Id,

    /// [`Patch`] to apply.
    ///
    /// [`Patch`]: seller::Patch
    pub patch: seller::Patch,
}

impl<Api, S> Command<UpdateProfile> for Service<Api, S>
where
    Api: Gateway<
            Update<(seller::Id, seller::Patch)>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProfile,
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
            Role::Staff => {
                if actor.id != cmd.seller_id {
                    return Err(tracerr::new!(E::Forbidden(cmd.seller_id)));
                }
            }
        }

        self.api()
            .execute(Update((cmd.seller_id, cmd.patch)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // The persisted profile is stale now, so force a re-login.
        if actor.id == cmd.seller_id {
            self.session().logout();
        }
        Ok(())
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Staff actor tried to patch a profile other than its own.
    #[display("cannot patch the profile of `Seller(id: {_0})`")]
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
    use common::operations::Update;
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

    use super::{ExecutionError, UpdateProfile};

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

    fn patch() -> seller::Patch {
        seller::Patch {
            full_name: "Renamed Seller".parse().unwrap(),
            email: "renamed@travel.vn".parse().unwrap(),
            phone_number: None,
            qr_code_url: None,
        }
    }

    /// [`Gateway`] double acknowledging any patch.
    struct Acking;

    impl Gateway<Update<(seller::Id, seller::Patch)>> for Acking {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Update<(seller::Id, seller::Patch)>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn staff_cannot_patch_another_seller() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        let res = service
            .execute(UpdateProfile {
                seller_id: 7.into(),
                patch: patch(),
            })
            .await;

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
        // Authorization failures don't touch the session.
        assert!(service.session().current().is_some());
    }

    #[tokio::test]
    async fn patching_own_profile_destroys_session() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        service
            .execute(UpdateProfile {
                seller_id: 42.into(),
                patch: patch(),
            })
            .await
            .unwrap();

        assert_eq!(service.session().current(), None);
    }

    #[tokio::test]
    async fn admin_patching_other_seller_keeps_session() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(1, Role::Admin), Token::from("t"))
                .unwrap(),
        );

        service
            .execute(UpdateProfile {
                seller_id: 42.into(),
                patch: patch(),
            })
            .await
            .unwrap();

        assert!(service.session().current().is_some());
    }
}
