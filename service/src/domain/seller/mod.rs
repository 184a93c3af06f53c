//! [`Seller`] definitions.

pub mod session;

use std::{str::FromStr, sync::LazyLock};

use common::define_kind;
use derive_more::{AsRef, Display, From, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};
use serde::{Deserialize, Serialize};

use crate::domain::PhoneNumber;

pub use self::session::Session;

/// Seller account.
///
/// A [`Seller`] is both a referenced entity (bookings belong to sellers)
/// and the authenticated identity of this application: logging in yields
/// the [`Seller`] profile of the signed-in principal.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// ID of this [`Seller`].
    pub id: Id,

    /// [`FullName`] of this [`Seller`].
    pub full_name: FullName,

    /// [`Email`] of this [`Seller`].
    pub email: Email,

    /// [`PhoneNumber`] of this [`Seller`].
    #[serde(default)]
    pub phone_number: Option<PhoneNumber>,

    /// [`Role`] of this [`Seller`].
    pub role: Role,

    /// URL of the payment QR code image of this [`Seller`].
    #[serde(default)]
    pub qr_code_url: Option<QrCodeUrl>,
}

/// ID of a [`Seller`].
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

define_kind! {
    #[doc = "Role of a [`Seller`], deciding which screen set it may use."]
    enum Role {
        #[doc = "Administrator: manages sellers and all bookings."]
        Admin = 1,

        #[doc = "Staff: manages only its own bookings."]
        Staff = 2,
    }
}

/// Full name of a [`Seller`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct FullName(String);

impl FullName {
    /// Creates a new [`FullName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FullName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for FullName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FullName`")
    }
}

/// Email address of a [`Seller`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking the general `local@domain.tld`
        /// [`Email`] shape.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// URL of a [`Seller`]'s payment QR code image.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct QrCodeUrl(String);

/// Password of a [`Seller`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq, Serialize)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() > 1 && password.len() <= 128
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Credentials a [`Seller`] signs in with.
#[derive(Debug)]
pub struct Credentials {
    /// [`Email`] the [`Seller`] signs in with.
    pub email: Email,

    /// [`Password`] of the [`Seller`].
    pub password: SecretBox<Password>,
}

/// Patch of a [`Seller`] profile.
///
/// Applying one replaces the stored profile wholesale, so a successful
/// patch always invalidates the active [`Session`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// New [`FullName`] of the [`Seller`].
    pub full_name: FullName,

    /// New [`Email`] of the [`Seller`].
    pub email: Email,

    /// New [`PhoneNumber`] of the [`Seller`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,

    /// New QR code image URL of the [`Seller`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<QrCodeUrl>,
}

/// Draft of a new [`Seller`] account.
///
/// Covers the profile fields only; the backend assigns the ID and the
/// initial credentials, and the QR code image is uploaded separately.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// [`FullName`] of the new [`Seller`].
    pub full_name: FullName,

    /// [`Email`] of the new [`Seller`].
    pub email: Email,

    /// [`PhoneNumber`] of the new [`Seller`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
}

/// New password of a [`Seller`].
#[derive(Debug)]
pub struct PasswordChange {
    /// The new [`Password`] to set.
    pub password: SecretBox<Password>,
}

#[cfg(test)]
mod spec {
    use super::{Email, FullName, Role, Seller};

    #[test]
    fn deserializes_wire_profile() {
        let seller: Seller = serde_json::from_str(
            r#"{
                "id": 42,
                "fullName": "Tran Thi B",
                "email": "b@travel.vn",
                "phoneNumber": "0987654321",
                "role": "staff"
            }"#,
        )
        .unwrap();

        assert_eq!(seller.id, 42.into());
        assert_eq!(seller.role, Role::Staff);
        assert_eq!(seller.qr_code_url, None);
    }

    #[test]
    fn rejects_unknown_role() {
        let res = serde_json::from_str::<Seller>(
            r#"{
                "id": 1,
                "fullName": "X",
                "email": "x@y.z",
                "role": "superuser"
            }"#,
        );

        assert!(res.is_err());
    }

    #[test]
    fn full_name_format() {
        assert!(FullName::new("Nguyen Van A").is_some());
        assert!(FullName::new("").is_none());
        assert!(FullName::new(" padded ").is_none());
    }

    #[test]
    fn email_format() {
        assert!(Email::new("a@travel.vn").is_some());
        assert!(Email::new("not-an-email").is_none());
        assert!(Email::new("a b@travel.vn").is_none());
    }
}
