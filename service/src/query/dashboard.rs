//! [`Query`] collection related to the dashboard.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::read;

use super::GatewayQuery;

/// Queries the headline [`Stats`](read::dashboard::Stats) within the
/// given [`Filter`](read::booking::Filter) scope.
pub type Stats = GatewayQuery<By<read::dashboard::Stats, read::booking::Filter>>;

/// Queries the per-seller revenue breakdown of a month.
pub type Revenue = GatewayQuery<
    By<
        Vec<read::dashboard::SellerRevenue>,
        (read::dashboard::Month, read::dashboard::Year),
    >,
>;
