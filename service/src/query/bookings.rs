//! [`Query`] collection related to the multiple [`Booking`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Booking, read};

use super::GatewayQuery;

/// Queries a list of [`Booking`]s within the given
/// [`Filter`](read::booking::Filter) scope.
pub type List = GatewayQuery<By<Vec<Booking>, read::booking::Filter>>;
