//! [`Rating`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Review rating of a property, from `0` to `5` stars inclusive.
///
/// Fractional values appear as averages of many reviews.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible [`Rating`].
    pub const MAX: Self = Self(Decimal::from_parts(5, 0, 0, false, 0));

    /// Creates a new [`Rating`] by checking the provided value is between `0`
    /// and `5` inclusive.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Self::MAX.0).then_some(Self(val))
    }

    /// Returns the underlying value of this [`Rating`].
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }
}

impl FromStr for Rating {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid rating value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Floating-point rating from `0` to `5` stars.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Rating = super::Rating;

    impl Rating {
        fn to_output<S: ScalarValue>(r: &Rating) -> Value<S> {
            Value::scalar(r.0.round_dp(2).normalize().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Rating` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Rating` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Rating;

    #[test]
    fn from_str() {
        assert!(Rating::from_str("0").is_ok());
        assert!(Rating::from_str("4").is_ok());
        assert!(Rating::from_str("4.5").is_ok());
        assert!(Rating::from_str("5").is_ok());

        assert!(Rating::from_str("5.01").is_err());
        assert!(Rating::from_str("-1").is_err());
        assert!(Rating::from_str("four").is_err());
    }

    #[test]
    fn max() {
        assert_eq!(Rating::MAX, Rating::from_str("5").unwrap());
    }
}
