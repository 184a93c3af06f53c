//! [`PhoneNumber`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Phone number of a customer or a [`Seller`].
///
/// [`Seller`]: crate::domain::Seller
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new [`PhoneNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`PhoneNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`PhoneNumber`] invariants:
        /// exactly 10 digits, nothing else.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[0-9]{10}$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for PhoneNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PhoneNumber`")
    }
}

#[cfg(test)]
mod spec {
    use super::PhoneNumber;

    #[test]
    fn accepts_ten_digits() {
        assert!(PhoneNumber::new("0123456789").is_some());
    }

    #[test]
    fn rejects_everything_else() {
        assert!(PhoneNumber::new("123456789").is_none());
        assert!(PhoneNumber::new("01234567890").is_none());
        assert!(PhoneNumber::new("0123-45678").is_none());
        assert!(PhoneNumber::new("").is_none());
    }
}
