//! [`Query`] collection related to the multiple [`Reservation`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Reservation, Query};
use crate::read::reservation::listing;

use super::DatabaseQuery;

/// Queries a list of a guest's [`Reservation`]s in some
/// [`listing::Timeframe`].
pub type List = DatabaseQuery<By<Vec<listing::Item>, listing::Selector>>;
