//! Dashboard read model definitions.

use common::Money;
use derive_more::{Display, From, Into};
use serde::Deserialize;

use crate::domain::seller;

/// Headline dashboard statistics.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of bookings in scope.
    pub total_bookings: u64,

    /// Total revenue of the bookings in scope.
    pub total_revenue: Money,
}

/// Revenue of a single seller within a month.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerRevenue {
    /// ID of the seller.
    pub seller_id: seller::Id,

    /// Display name of the seller.
    pub full_name: String,

    /// Revenue of the seller within the requested month.
    pub revenue: Money,
}

/// Month of a revenue report, `1..=12`.
#[derive(Clone, Copy, Debug, Display, Eq, Into, PartialEq)]
pub struct Month(u8);

impl Month {
    /// Creates a new [`Month`] if the given `month` is within `1..=12`.
    #[must_use]
    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }
}

/// Year of a revenue report.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Year(i32);
