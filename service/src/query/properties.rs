//! [`Query`] collection related to the multiple [`Property`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Property, Query};
use crate::read::property::search;

use super::DatabaseQuery;

/// Searches [`Property`]s matching the provided [`search::Options`].
pub type Search = DatabaseQuery<By<Vec<search::Listing>, search::Selector>>;
