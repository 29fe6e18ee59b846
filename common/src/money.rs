//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

/// Number of [`MinorUnits`] in a single major unit of [`Money`].
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Amount of money in major currency units (e.g. dollars).
///
/// This is the form prices are entered in by users.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new [`Money`] amount if the given one is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount))
    }

    /// Returns the amount of this [`Money`] in major units.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Converts this [`Money`] into [`MinorUnits`], rounding half away from
    /// zero to a whole minor unit.
    ///
    /// [`None`] is returned if the result doesn't fit into [`MinorUnits`].
    #[must_use]
    pub fn to_minor_units(&self) -> Option<MinorUnits> {
        (self.0 * Decimal::from(MINOR_UNITS_PER_MAJOR))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .map(MinorUnits)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl From<MinorUnits> for Money {
    fn from(units: MinorUnits) -> Self {
        Self(Decimal::new(i64::from(units.0), 2))
    }
}

/// Amount of money in minor currency units (e.g. cents).
///
/// This is the form prices are stored and compared in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct MinorUnits(i32);

impl MinorUnits {
    /// Largest representable amount of [`MinorUnits`].
    pub const MAX: Self = Self(i32::MAX);

    /// Creates new [`MinorUnits`] if the given amount is not negative.
    #[must_use]
    pub fn new(units: i32) -> Option<Self> {
        (units >= 0).then_some(Self(units))
    }

    /// Returns the raw number of minor units.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{MinorUnits, Money};

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert!(Money::from_str("123.45").is_ok());
        assert!(Money::from_str("123").is_ok());
        assert!(Money::from_str("0").is_ok());

        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn to_minor_units() {
        assert_eq!(money("50").to_minor_units(), MinorUnits::new(5000));
        assert_eq!(money("150").to_minor_units(), MinorUnits::new(15000));
        assert_eq!(money("49.99").to_minor_units(), MinorUnits::new(4999));
        assert_eq!(money("0.005").to_minor_units(), MinorUnits::new(1));
        assert_eq!(money("0.004").to_minor_units(), MinorUnits::new(0));

        assert_eq!(money("100000000").to_minor_units(), None);
    }

    #[test]
    fn from_minor_units() {
        assert_eq!(
            Money::from(MinorUnits::new(12345).unwrap()).to_string(),
            "123.45",
        );
        assert_eq!(Money::from(MinorUnits::new(5000).unwrap()).to_string(), "50");
    }
}
