//! [`BookingForm`] state and its synchronization.

use derive_more::Display;
use serde::Serialize;

use crate::domain::{
    booking::{
        Booking, CheckInDateTime, CheckOutDateTime, CustomerName, GuestCount,
        Note, Price, RoomClass, RoomCount, ServiceRequest,
    },
    seller::{self, Role},
    PhoneNumber, Seller,
};

/// Editable state of the booking create/edit form.
///
/// Every control value is optional, mirroring an empty input; typed
/// invariants are only enforced by [`validate`], which is also the point
/// where cross-field rules (check-out not before check-in) are applied
/// against the *live* field values.
///
/// [`validate`]: BookingForm::validate
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingForm {
    /// Customer name input.
    pub customer_name: Option<String>,

    /// Customer phone number input.
    pub phone_number: Option<String>,

    /// Service request input.
    pub service_request: Option<String>,

    /// Guest count input.
    pub guest_count: Option<u32>,

    /// Room count input.
    pub room_count: Option<u32>,

    /// Room class selection.
    pub room_class: Option<RoomClass>,

    /// Check-in date selection.
    pub check_in: Option<CheckInDateTime>,

    /// Check-out date selection.
    pub check_out: Option<CheckOutDateTime>,

    /// Price input.
    pub price: Option<Price>,

    /// Original (purchase) price input.
    pub original_price: Option<Price>,

    /// Note input.
    pub note: Option<String>,

    /// Seller selection.
    ///
    /// Not user-editable for staff: forced to the signed-in seller both
    /// on [`synchronize`] and again by [`validate`] right before
    /// submission.
    ///
    /// [`synchronize`]: BookingForm::synchronize
    /// [`validate`]: BookingForm::validate
    pub seller_id: Option<seller::Id>,

    /// Live mirror of the price input, observed separately for display
    /// formatting.
    pub price_preview: Price,

    /// Live mirror of the original price input.
    pub original_price_preview: Price,
}

impl BookingForm {
    /// Reconciles the form with the given `initial` record.
    ///
    /// With a record present (edit mode) every field is populated from
    /// it, and the price mirrors follow. Without one (create mode) the
    /// form is cleared and seeded with the defaults: 1 guest, 1 room,
    /// zero prices.
    ///
    /// In both modes a staff `actor` has the seller selection forced to
    /// itself.
    ///
    /// Idempotent: re-running with the same inputs and no interleaved
    /// edits leaves the form unchanged.
    pub fn synchronize(&mut self, initial: Option<&Booking>, actor: &Seller) {
        match initial {
            Some(booking) => {
                self.customer_name = Some(booking.customer_name.to_string());
                self.phone_number = Some(booking.phone_number.to_string());
                self.service_request =
                    Some(booking.service_request.to_string());
                self.guest_count = Some(booking.guest_count.into());
                self.room_count = Some(booking.room_count.into());
                self.room_class = booking.room_class;
                self.check_in = Some(booking.check_in);
                self.check_out = Some(booking.check_out);
                self.price = Some(booking.price);
                self.original_price = Some(booking.original_price);
                self.note = booking.note.as_ref().map(ToString::to_string);
                self.seller_id = Some(booking.seller_id);
                self.price_preview = booking.price;
                self.original_price_preview = booking.original_price;
            }
            None => {
                *self = Self {
                    guest_count: Some(1),
                    room_count: Some(1),
                    price: Some(Price::ZERO),
                    original_price: Some(Price::ZERO),
                    ..Self::default()
                };
            }
        }

        match actor.role {
            Role::Staff => self.seller_id = Some(actor.id),
            Role::Admin => {}
        }
    }

    /// Sets the price input, keeping its live mirror in sync.
    pub fn set_price(&mut self, price: Price) {
        self.price = Some(price);
        self.price_preview = price;
    }

    /// Sets the original price input, keeping its live mirror in sync.
    pub fn set_original_price(&mut self, price: Price) {
        self.original_price = Some(price);
        self.original_price_preview = price;
    }

    /// Validates the form against the signed-in `actor` and produces the
    /// submission payload.
    ///
    /// Pure: makes no network call and leaves the form untouched, so a
    /// failed submission can be retried with the entered values intact.
    ///
    /// For a staff `actor` the emitted [`BookingDraft::seller_id`] is the
    /// actor itself, whatever the (disabled) seller control holds.
    ///
    /// # Errors
    ///
    /// Returns every offending field with its reason.
    pub fn validate(
        &self,
        actor: &Seller,
    ) -> Result<BookingDraft, Vec<FieldError>> {
        use Field as F;

        let mut errors = Vec::new();

        let customer_name = match self.customer_name.as_deref() {
            None => {
                errors.push(FieldError::required(F::CustomerName));
                None
            }
            Some(raw) => CustomerName::new(raw).or_else(|| {
                errors.push(F::CustomerName.invalid("must not be blank"));
                None
            }),
        };

        let phone_number = match self.phone_number.as_deref() {
            None => {
                errors.push(FieldError::required(F::PhoneNumber));
                None
            }
            Some(raw) => PhoneNumber::new(raw).or_else(|| {
                errors.push(
                    F::PhoneNumber.invalid("must be exactly 10 digits"),
                );
                None
            }),
        };

        let service_request = match self.service_request.as_deref() {
            None => {
                errors.push(FieldError::required(F::ServiceRequest));
                None
            }
            Some(raw) => ServiceRequest::new(raw).or_else(|| {
                errors.push(F::ServiceRequest.invalid(
                    "must not be blank and at most 255 characters",
                ));
                None
            }),
        };

        let guest_count = match self.guest_count {
            None => {
                errors.push(FieldError::required(F::GuestCount));
                None
            }
            Some(count) => GuestCount::new(count).or_else(|| {
                errors.push(F::GuestCount.invalid("must be at least 1"));
                None
            }),
        };

        let room_count = match self.room_count {
            None => {
                errors.push(FieldError::required(F::RoomCount));
                None
            }
            Some(count) => RoomCount::new(count).or_else(|| {
                errors.push(F::RoomCount.invalid("must be at least 1"));
                None
            }),
        };

        let check_in = self.check_in.or_else(|| {
            errors.push(FieldError::required(F::CheckInDate));
            None
        });

        let check_out = self.check_out.or_else(|| {
            errors.push(FieldError::required(F::CheckOutDate));
            None
        });

        // Cross-field rule, read against the live check-in value: editing
        // the check-in after the check-out was picked re-validates here.
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_out.coerce::<()>() < check_in.coerce() {
                errors.push(F::CheckOutDate.invalid(
                    "must not be before the check-in date",
                ));
            }
        }

        let price = self.price.or_else(|| {
            errors.push(FieldError::required(F::Price));
            None
        });

        let original_price = self.original_price.or_else(|| {
            errors.push(FieldError::required(F::OriginalPrice));
            None
        });

        let seller_id = match actor.role {
            // Pre-submit override: the control's value is irrelevant.
            Role::Staff => Some(actor.id),
            Role::Admin => self.seller_id.or_else(|| {
                errors.push(FieldError::required(F::Seller));
                None
            }),
        };

        let note = self
            .note
            .as_deref()
            .filter(|note| !note.trim().is_empty())
            .map(Note::from);

        let draft = (|| {
            Some(BookingDraft {
                customer_name: customer_name?,
                phone_number: phone_number?,
                service_request: service_request?,
                guest_count: guest_count?,
                room_count: room_count?,
                room_class: self.room_class,
                check_in: check_in?,
                check_out: check_out?,
                price: price?,
                original_price: original_price?,
                note,
                seller_id: seller_id?,
            })
        })();

        match draft {
            Some(draft) if errors.is_empty() => Ok(draft),
            Some(_) | None => Err(errors),
        }
    }
}

/// Validated submission payload of a [`BookingForm`].
///
/// Serializes into the wire shape the backend expects for booking
/// creation and update.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Name of the customer.
    pub customer_name: CustomerName,

    /// [`PhoneNumber`] of the customer.
    pub phone_number: PhoneNumber,

    /// Requested service description.
    pub service_request: ServiceRequest,

    /// Number of guests.
    pub guest_count: GuestCount,

    /// Number of rooms.
    pub room_count: RoomCount,

    /// [`RoomClass`] of the booked rooms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_class: Option<RoomClass>,

    /// Check-in date.
    #[serde(rename = "checkInDate", with = "common::datetime::serde::rfc3339")]
    pub check_in: CheckInDateTime,

    /// Check-out date.
    #[serde(
        rename = "checkOutDate",
        with = "common::datetime::serde::rfc3339"
    )]
    pub check_out: CheckOutDateTime,

    /// Price charged to the customer.
    pub price: Price,

    /// Price the service was purchased for.
    pub original_price: Price,

    /// Free-form note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,

    /// ID of the [`Seller`] the booking belongs to.
    pub seller_id: seller::Id,
}

/// Form field a validation failure points at.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Field {
    /// Customer name input.
    #[display("customer name")]
    CustomerName,

    /// Customer phone number input.
    #[display("phone number")]
    PhoneNumber,

    /// Service request input.
    #[display("service request")]
    ServiceRequest,

    /// Guest count input.
    #[display("guest count")]
    GuestCount,

    /// Room count input.
    #[display("room count")]
    RoomCount,

    /// Check-in date selection.
    #[display("check-in date")]
    CheckInDate,

    /// Check-out date selection.
    #[display("check-out date")]
    CheckOutDate,

    /// Price input.
    #[display("price")]
    Price,

    /// Original price input.
    #[display("original price")]
    OriginalPrice,

    /// Seller selection.
    #[display("seller")]
    Seller,
}

impl Field {
    /// Creates a [`FieldError`] of this [`Field`] with the given reason.
    fn invalid(self, reason: &str) -> FieldError {
        FieldError {
            field: self,
            reason: reason.to_owned(),
        }
    }
}

/// Inline validation failure of a single form [`Field`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{field}: {reason}")]
pub struct FieldError {
    /// [`Field`] the failure points at.
    pub field: Field,

    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    /// Creates a [`FieldError`] for a missing required [`Field`].
    fn required(field: Field) -> Self {
        field.invalid("is required")
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        booking::{Booking, CheckOutDateTime, Price},
        seller::Role,
        Seller,
    };

    use super::{BookingForm, Field};

    fn seller(id: i64, role: Role) -> Seller {
        serde_json::from_str(&format!(
            r#"{{
                "id": {id},
                "fullName": "Test Seller",
                "email": "seller@travel.vn",
                "role": "{role}"
            }}"#,
        ))
        .unwrap()
    }

    fn booking() -> Booking {
        serde_json::from_str(
            r#"{
                "id": 7,
                "customerName": "Nguyen Van A",
                "phoneNumber": "0123456789",
                "serviceRequest": "Hotel, twin room",
                "guestCount": 2,
                "roomCount": 1,
                "checkInDate": "2024-05-01T00:00:00Z",
                "checkOutDate": "2024-05-03T00:00:00Z",
                "price": 500000,
                "originalPrice": 400000,
                "sellerId": 9
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn create_mode_seeds_defaults() {
        let mut form = BookingForm::default();
        form.customer_name = Some("left-over".into());

        form.synchronize(None, &seller(1, Role::Admin));

        assert_eq!(form.customer_name, None);
        assert_eq!(form.guest_count, Some(1));
        assert_eq!(form.room_count, Some(1));
        assert_eq!(form.price, Some(Price::ZERO));
        assert_eq!(form.original_price, Some(Price::ZERO));
        assert_eq!(form.price_preview, Price::ZERO);
    }

    #[test]
    fn edit_mode_populates_every_field() {
        let booking = booking();
        let mut form = BookingForm::default();

        form.synchronize(Some(&booking), &seller(1, Role::Admin));

        assert_eq!(form.customer_name.as_deref(), Some("Nguyen Van A"));
        assert_eq!(form.phone_number.as_deref(), Some("0123456789"));
        assert_eq!(form.guest_count, Some(2));
        assert_eq!(form.check_in, Some(booking.check_in));
        assert_eq!(form.check_out, Some(booking.check_out));
        assert_eq!(form.seller_id, Some(booking.seller_id));
        // The separately observed price mirror follows the record.
        assert_eq!(form.price_preview, booking.price);
    }

    #[test]
    fn synchronization_is_idempotent() {
        let booking = booking();
        let actor = seller(1, Role::Admin);

        let mut once = BookingForm::default();
        once.synchronize(Some(&booking), &actor);

        let mut twice = once.clone();
        twice.synchronize(Some(&booking), &actor);

        assert_eq!(once, twice);
    }

    #[test]
    fn staff_gets_seller_forced_on_populate() {
        let mut form = BookingForm::default();
        form.synchronize(Some(&booking()), &seller(42, Role::Staff));

        assert_eq!(form.seller_id, Some(42.into()));

        form.synchronize(None, &seller(42, Role::Staff));
        assert_eq!(form.seller_id, Some(42.into()));
    }

    #[test]
    fn staff_gets_seller_forced_on_submit() {
        let mut form = BookingForm::default();
        form.synchronize(Some(&booking()), &seller(42, Role::Staff));
        // Whatever the disabled control displays is overridden.
        form.seller_id = Some(7.into());

        let draft = form.validate(&seller(42, Role::Staff)).unwrap();

        assert_eq!(draft.seller_id, 42.into());
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let actor = seller(1, Role::Admin);
        let mut form = BookingForm::default();
        form.synchronize(Some(&booking()), &actor);

        form.check_out = Some(
            CheckOutDateTime::from_rfc3339("2024-04-30T00:00:00Z").unwrap(),
        );
        let errors = form.validate(&actor).unwrap_err();
        assert!(errors.iter().any(|e| e.field == Field::CheckOutDate));

        form.check_out = Some(
            CheckOutDateTime::from_rfc3339("2024-05-04T00:00:00Z").unwrap(),
        );
        assert!(form.validate(&actor).is_ok());
    }

    #[test]
    fn check_out_is_validated_against_live_check_in() {
        let actor = seller(1, Role::Admin);
        let mut form = BookingForm::default();
        form.synchronize(Some(&booking()), &actor);

        // Check-out 2024-05-03 was fine, until the check-in moves past it.
        form.check_in = Some(
            crate::domain::booking::CheckInDateTime::from_rfc3339(
                "2024-05-10T00:00:00Z",
            )
            .unwrap(),
        );

        let errors = form.validate(&actor).unwrap_err();
        assert!(errors.iter().any(|e| e.field == Field::CheckOutDate));
    }

    #[test]
    fn validation_failure_leaves_the_form_untouched() {
        let actor = seller(1, Role::Admin);
        let mut form = BookingForm::default();
        form.synchronize(None, &actor);
        form.customer_name = Some("Nguyen Van A".into());

        let before = form.clone();
        assert!(form.validate(&actor).is_err());
        assert_eq!(form, before);
    }

    #[test]
    fn draft_serializes_into_wire_shape() {
        let actor = seller(42, Role::Staff);
        let mut form = BookingForm::default();
        form.synchronize(Some(&booking()), &actor);

        let draft = form.validate(&actor).unwrap();
        let wire = serde_json::to_value(&draft).unwrap();

        assert_eq!(wire["customerName"], "Nguyen Van A");
        assert_eq!(wire["checkInDate"], "2024-05-01T00:00:00Z");
        assert_eq!(wire["sellerId"], 42);
        assert!(wire.get("note").is_none());
    }
}
