//! [`Command`] for creating a [`Booking`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Booking,
    form::{booking::FieldError, BookingDraft, BookingForm},
    infra::{gateway, Gateway, Storage},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`] out of a [`BookingForm`].
///
/// The form is validated against the signed-in [`Seller`] right before
/// submission, so the submitted draft always reflects the live field
/// values and the actor's role.
///
/// [`Seller`]: crate::domain::Seller
#[derive(Clone, Debug, From)]
pub struct CreateBooking(pub BookingForm);

impl<Api, S> Command<CreateBooking> for Service<Api, S>
where
    Api: Gateway<
            Insert<BookingDraft>,
            Ok = Booking,
            Err = Traced<gateway::Error>,
        >,
    S: Storage,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateBooking(form): CreateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let actor = self
            .session()
            .current()
            .ok_or(E::NotAuthenticated)
            .map_err(tracerr::wrap!())?
            .seller;

        let draft = form
            .validate(&actor)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.api()
            .execute(Insert(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
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

#[cfg(test)]
mod spec {
    use common::operations::Insert;
    use tracerr::Traced;

    use crate::{
        domain::{
            booking::{CheckInDateTime, CheckOutDateTime},
            seller::{session::Token, Role},
            Booking, Seller,
        },
        form::{BookingDraft, BookingForm},
        infra::{gateway, storage::Memory, Gateway},
        session::Store,
        Command as _, Service,
    };

    use super::{CreateBooking, ExecutionError};

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

    fn filled_form(actor: &Seller) -> BookingForm {
        let mut form = BookingForm::default();
        form.synchronize(None, actor);
        form.customer_name = Some("Nguyen Van A".into());
        form.phone_number = Some("0123456789".into());
        form.service_request = Some("Hotel, twin room".into());
        form.check_in =
            CheckInDateTime::from_rfc3339("2024-05-01T00:00:00Z").ok();
        form.check_out =
            CheckOutDateTime::from_rfc3339("2024-05-04T00:00:00Z").ok();
        form
    }

    /// [`Gateway`] double echoing the created [`Booking`] back.
    struct Creating;

    impl Gateway<Insert<BookingDraft>> for Creating {
        type Ok = Booking;
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            Insert(draft): Insert<BookingDraft>,
        ) -> Result<Self::Ok, Self::Err> {
            let mut value = serde_json::to_value(&draft).unwrap();
            drop(
                value
                    .as_object_mut()
                    .unwrap()
                    .insert("id".into(), 7.into()),
            );
            Ok(serde_json::from_value(value).unwrap())
        }
    }

    #[tokio::test]
    async fn submits_validated_draft() {
        let service = Service::new(Creating, Store::new(Memory::default()));
        let actor = seller(42, Role::Staff);
        drop(
            service
                .session()
                .login(actor.clone(), Token::from("t"))
                .unwrap(),
        );

        let booking = service
            .execute(CreateBooking(filled_form(&actor)))
            .await
            .unwrap();

        assert_eq!(booking.id, 7.into());
        // Staff submissions are always attributed to the actor.
        assert_eq!(booking.seller_id, 42.into());
    }

    #[tokio::test]
    async fn rejects_unauthenticated_submission() {
        let service = Service::new(Creating, Store::new(Memory::default()));

        let res = service
            .execute(CreateBooking(filled_form(&seller(42, Role::Staff))))
            .await;

        match res {
            Err(e) => assert!(matches!(
                e.as_ref(),
                ExecutionError::NotAuthenticated,
            )),
            Ok(_) => panic!("expected `NotAuthenticated`"),
        }
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let service = Service::new(Creating, Store::new(Memory::default()));
        let actor = seller(42, Role::Staff);
        drop(
            service
                .session()
                .login(actor.clone(), Token::from("t"))
                .unwrap(),
        );

        let mut form = filled_form(&actor);
        form.phone_number = Some("12345".into());

        let res = service.execute(CreateBooking(form)).await;

        match res {
            Err(e) => assert!(matches!(
                e.as_ref(),
                ExecutionError::Invalid(_),
            )),
            Ok(_) => panic!("expected `Invalid`"),
        }
    }
}
