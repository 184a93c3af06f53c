//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Non-negative amount of money.
///
/// Displayed with `.`-separated thousands groups, the way the booking
/// screens format prices (`500000` renders as `500.000`).
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// [`Money`] amount of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_integer() {
            return write!(f, "{}", self.0);
        }

        let digits = self
            .0
            .to_i128()
            .map_or_else(|| self.0.to_string(), |i| i.to_string());
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - offset) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        f.write_str(&out)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let plain = s.replace('.', "");
        let amount =
            Decimal::from_str(&plain).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl TryFrom<Decimal> for Money {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative amount")
    }
}

mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! The REST wire carries prices as plain JSON numbers.

    use rust_decimal::{
        prelude::{FromPrimitive as _, ToPrimitive as _},
        Decimal,
    };
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::Money;

    impl serde::Serialize for Money {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match self.0.to_f64() {
                Some(amount) => serializer.serialize_f64(amount),
                None => Err(serde::ser::Error::custom("amount out of range")),
            }
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let amount = f64::deserialize(deserializer)?;
            let amount = Decimal::from_f64(amount)
                .ok_or_else(|| D::Error::custom("not a decimal number"))?;
            Money::new(amount)
                .ok_or_else(|| D::Error::custom("negative amount"))
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("500000").unwrap(),
            Money::new(decimal("500000")).unwrap(),
        );
        assert_eq!(
            Money::from_str("500.000").unwrap(),
            Money::new(decimal("500000")).unwrap(),
        );
        assert_eq!(Money::from_str("0").unwrap(), Money::ZERO);

        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn displays_grouped() {
        assert_eq!(Money::from_str("500000").unwrap().to_string(), "500.000");
        assert_eq!(
            Money::from_str("1234567").unwrap().to_string(),
            "1.234.567",
        );
        assert_eq!(Money::from_str("999").unwrap().to_string(), "999");
        assert_eq!(Money::ZERO.to_string(), "0");
    }

    #[test]
    fn rejects_negative() {
        assert!(Money::new(decimal("-0.01")).is_none());
        assert!(Money::new(decimal("0")).is_some());
    }
}
