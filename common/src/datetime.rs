//! Date and time utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{format_description::well_known::Rfc3339, UtcOffset};

use crate::DateOf;

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// Moment in time, kept in UTC with microsecond precision.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Returns the current moment.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        time::OffsetDateTime::now_utc()
            .try_into()
            .expect("current UTC moment is in range")
    }

    /// Parses a [`DateTime`] from the provided [RFC 3339] string, converting
    /// it to UTC.
    ///
    /// # Errors
    ///
    /// If the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(ParseError::Parse)?
            .try_into()
            .map_err(ParseError::OutOfRange)
    }

    /// Returns the UTC calendar date this [`DateTime`] falls on.
    #[must_use]
    pub fn date<DateOfKind: ?Sized>(&self) -> DateOf<DateOfKind> {
        self.inner.date().into()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed moment is not representable as a [`DateTime`].
    OutOfRange(OutOfRange),
}

/// Error of a moment falling outside the years a [`DateTime`] supports once
/// converted to UTC.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("moment is out of the supported range")]
pub struct OutOfRange;

impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.inner.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = OutOfRange;

    /// Truncates the provided moment to microseconds, which is the precision
    /// PostgreSQL keeps.
    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        let utc = dt.checked_to_offset(UtcOffset::UTC).ok_or(OutOfRange)?;
        utc.replace_microsecond(utc.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(|_| OutOfRange)
    }
}

#[cfg(test)]
mod spec {
    use crate::Date;

    use super::{DateTime, ParseError};

    #[test]
    fn parses_rfc3339_in_utc() {
        let dt = DateTime::from_rfc3339("2027-03-04T23:30:00-02:00").unwrap();

        assert_eq!(dt.to_string(), "2027-03-05T01:30:00Z");
        assert_eq!(dt.date::<()>(), "2027-03-05".parse::<Date>().unwrap());
    }

    #[test]
    fn orders_by_instant() {
        let earlier = DateTime::from_rfc3339("2027-03-04T10:00:00Z").unwrap();
        let later = DateTime::from_rfc3339("2027-03-04T12:00:00+01:00").unwrap();

        assert!(earlier < later);
        assert!(DateTime::from_rfc3339("2027-03-04").is_err());
    }

    #[test]
    fn rejects_moments_beyond_utc_range() {
        let err =
            DateTime::from_rfc3339("9999-12-31T23:30:00-02:00").unwrap_err();

        assert!(matches!(err, ParseError::OutOfRange(_)), "{err}");
        assert!(DateTime::from_rfc3339("9999-12-31T23:30:00+02:00").is_ok());
    }

    #[test]
    fn date_midnight_precedes_its_moments() {
        let dt = DateTime::from_rfc3339("2027-03-04T10:00:00Z").unwrap();
        let date = dt.date::<()>();

        assert!(date.midnight::<()>() <= dt);
        assert_eq!(date.midnight::<()>().date::<()>(), date);
    }
}
