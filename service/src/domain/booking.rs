//! [`Booking`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{seller, PhoneNumber};

/// Booking of a travel service, owned by exactly one [`Seller`].
///
/// This is the remote entity as the backend serves it; the editable
/// counterpart is [`form::booking::BookingForm`].
///
/// [`Seller`]: crate::domain::Seller
/// [`form::booking::BookingForm`]: crate::form::booking::BookingForm
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// Name of the customer this [`Booking`] is for.
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
    #[serde(default)]
    pub room_class: Option<RoomClass>,

    /// [`DateTime`] of the check-in.
    #[serde(rename = "checkInDate", with = "common::datetime::serde::rfc3339")]
    pub check_in: CheckInDateTime,

    /// [`DateTime`] of the check-out.
    #[serde(
        rename = "checkOutDate",
        with = "common::datetime::serde::rfc3339"
    )]
    pub check_out: CheckOutDateTime,

    /// Price charged to the customer.
    pub price: Price,

    /// Price the service was purchased for.
    #[serde(default)]
    pub original_price: Price,

    /// Free-form note.
    #[serde(default)]
    pub note: Option<Note>,

    /// ID of the [`Seller`] this [`Booking`] belongs to.
    ///
    /// [`Seller`]: crate::domain::Seller
    pub seller_id: seller::Id,

    /// [`DateTime`] when this [`Booking`] was created.
    #[serde(
        default,
        with = "common::datetime::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<CreationDateTime>,
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    derive_more::FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(i64);

/// Name of the customer of a [`Booking`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct CustomerName(String);

impl CustomerName {
    /// Creates a new [`CustomerName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`CustomerName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for CustomerName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CustomerName`")
    }
}

/// Requested service description of a [`Booking`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct ServiceRequest(String);

impl ServiceRequest {
    /// Maximum length of a [`ServiceRequest`], in characters.
    pub const MAX_LEN: usize = 255;

    /// Creates a new [`ServiceRequest`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`ServiceRequest`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for ServiceRequest {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ServiceRequest`")
    }
}

/// Number of guests of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct GuestCount(u32);

impl GuestCount {
    /// Creates a new [`GuestCount`] if the given `count` is at least 1.
    #[must_use]
    pub fn new(count: u32) -> Option<Self> {
        (count >= 1).then_some(Self(count))
    }
}

/// Number of rooms of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct RoomCount(u32);

impl RoomCount {
    /// Creates a new [`RoomCount`] if the given `count` is at least 1.
    #[must_use]
    pub fn new(count: u32) -> Option<Self> {
        (count >= 1).then_some(Self(count))
    }
}

define_kind! {
    #[doc = "Class of the rooms of a [`Booking`]."]
    enum RoomClass {
        #[doc = "Standard room."]
        Standard = 1,

        #[doc = "Superior room."]
        Superior = 2,

        #[doc = "Deluxe room."]
        Deluxe = 3,

        #[doc = "Suite."]
        Suite = 4,
    }
}

define_kind! {
    #[doc = "Format a [`Booking`] can be exported in."]
    enum ExportFormat {
        #[doc = "PDF document."]
        Pdf = 1,

        #[doc = "Plain text."]
        Txt = 2,

        #[doc = "JPEG image."]
        Image = 3,
    }
}

/// Free-form note of a [`Booking`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Note(String);

/// Price of a [`Booking`], never negative.
pub type Price = Money;

/// [`DateTime`] of a [`Booking`] check-in.
pub type CheckInDateTime = DateTimeOf<(Booking, unit::CheckIn)>;

/// [`DateTime`] of a [`Booking`] check-out.
pub type CheckOutDateTime = DateTimeOf<(Booking, unit::CheckOut)>;

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;
