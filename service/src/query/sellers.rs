//! [`Query`] collection related to the multiple [`Seller`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::Seller;

use super::GatewayQuery;

/// Queries the list of every [`Seller`], for the admin seller directory
/// and the seller selection control.
pub type List = GatewayQuery<By<Vec<Seller>, ()>>;
