//! [`Session`] definitions.

use derive_more::{AsRef, Display, From, FromStr};

use crate::domain::Seller;

/// Authenticated session.
///
/// A [`Session`] always pairs the signed-in [`Seller`] with its
/// credential [`Token`]: there is no way to hold one without the other,
/// an absent session is simply [`Option::None`].
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// [`Seller`] this [`Session`] belongs to.
    pub seller: Seller,

    /// [`Token`] of this [`Session`].
    pub token: Token,
}

/// Opaque credential token of a [`Session`].
///
/// Issued by the backend on login and replayed verbatim as the bearer
/// credential of every authenticated request; never inspected locally.
#[derive(AsRef, Clone, Debug, Display, Eq, From, FromStr, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Token(String);
