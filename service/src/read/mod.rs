//! Read entities definitions.

pub mod property;
pub mod reservation;

use derive_more::{Display, From, Into};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Maximum number of items returned in a list.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    SmartDefault,
)]
pub struct Limit(#[default(10)] u16);

impl Limit {
    /// Returns this [`Limit`] as a SQL `INT8` value.
    #[must_use]
    pub fn sql(self) -> i64 {
        i64::from(self.0)
    }
}
