//! [`Command`] for changing a [`Seller`] password.
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

/// [`Command`] for setting a new [`Seller`] password.
///
/// Staff may change only its own password; admins may change anyone's.
/// Changing the signed-in password destroys the active [`Session`]: the
/// issued credential is no longer trustworthy.
///
/// [`Seller`]: crate::domain::Seller
#[derive(Debug)]
pub struct ChangePassword {
    /// ID of the [`Seller`] to change the password of.
    ///
    /// [`Seller`]: crate::domain::Seller
    pub seller_id: seller::Id,

    /// New password to set.
    pub change: seller::PasswordChange,
}

impl<Api, S> Command<ChangePassword> for Service<Api, S>
where
    Api: Gateway<
            Update<(seller::Id, seller::PasswordChange)>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ChangePassword,
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
            .execute(Update((cmd.seller_id, cmd.change)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if actor.id == cmd.seller_id {
            self.session().logout();
        }
        Ok(())
    }
}

/// Error of [`ChangePassword`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Staff actor tried to change a password other than its own.
    #[display("cannot change the password of `Seller(id: {_0})`")]
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
    use secrecy::SecretBox;
    use tracerr::Traced;

    use crate::{
        domain::{
            seller::{
                self, session::Token, Password, PasswordChange, Role,
            },
            Seller,
        },
        infra::{gateway, storage::Memory, Gateway},
        session::Store,
        Command as _, Service,
    };

    use super::ChangePassword;

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

    fn change() -> PasswordChange {
        PasswordChange {
            password: SecretBox::new(Box::new(Password::from("new-secret"))),
        }
    }

    /// [`Gateway`] double acknowledging any password change.
    struct Acking;

    impl Gateway<Update<(seller::Id, PasswordChange)>> for Acking {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Update<(seller::Id, PasswordChange)>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn changing_own_password_destroys_session() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        service
            .execute(ChangePassword {
                seller_id: 42.into(),
                change: change(),
            })
            .await
            .unwrap();

        assert_eq!(service.session().current(), None);
    }

    #[tokio::test]
    async fn staff_cannot_change_another_password() {
        let service = Service::new(Acking, Store::new(Memory::default()));
        drop(
            service
                .session()
                .login(seller(42, Role::Staff), Token::from("t"))
                .unwrap(),
        );

        let res = service
            .execute(ChangePassword {
                seller_id: 1.into(),
                change: change(),
            })
            .await;

        assert!(res.is_err());
        assert!(service.session().current().is_some());
    }
}
