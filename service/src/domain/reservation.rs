//! [`Reservation`] definitions.

use common::{unit, Date, DateOf};
use derive_more::{Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{property, user};
#[cfg(doc)]
use crate::domain::{Property, User};

/// Booked date range of a [`Property`] by a guest [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: Id,

    /// ID of the reserved [`Property`].
    pub property_id: property::Id,

    /// ID of the guest [`User`] this [`Reservation`] is made by.
    pub guest_id: user::Id,

    /// [`StartDate`] of this [`Reservation`].
    pub start_date: StartDate,

    /// [`EndDate`] of this [`Reservation`].
    pub end_date: EndDate,
}

impl Reservation {
    /// Returns the [`Period`] of this [`Reservation`].
    #[must_use]
    pub fn period(&self) -> Period {
        Period {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Indicates whether this [`Reservation`] is fulfilled as of the given
    /// `today`, meaning it has already started.
    #[must_use]
    pub fn is_fulfilled(&self, today: Date) -> bool {
        self.start_date.coerce::<()>() <= today
    }
}

/// Data of a new [`Reservation`] not stored yet.
#[derive(Clone, Copy, Debug)]
pub struct New {
    /// ID of the [`Property`] to reserve.
    pub property_id: property::Id,

    /// ID of the guest [`User`] making the new [`Reservation`].
    pub guest_id: user::Id,

    /// [`Period`] of the new [`Reservation`].
    pub period: Period,
}

/// ID of a [`Reservation`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

/// [`Date`] a [`Reservation`] starts at.
pub type StartDate = DateOf<(Reservation, unit::Start)>;

/// [`Date`] a [`Reservation`] ends at.
pub type EndDate = DateOf<(Reservation, unit::End)>;

/// Date range of a [`Reservation`], starting strictly before it ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Period {
    /// [`StartDate`] of this [`Period`].
    start: StartDate,

    /// [`EndDate`] of this [`Period`].
    end: EndDate,
}

impl Period {
    /// Creates a new [`Period`] out of the provided dates.
    ///
    /// # Errors
    ///
    /// If the `start` is not strictly before the `end`.
    pub fn new(start: StartDate, end: EndDate) -> Result<Self, PeriodError> {
        if start.coerce::<()>() >= end.coerce() {
            return Err(PeriodError::StartNotBeforeEnd);
        }
        Ok(Self { start, end })
    }

    /// Returns the [`StartDate`] of this [`Period`].
    #[must_use]
    pub fn start(&self) -> StartDate {
        self.start
    }

    /// Returns the [`EndDate`] of this [`Period`].
    #[must_use]
    pub fn end(&self) -> EndDate {
        self.end
    }
}

/// Partial change of a [`Reservation`] [`Period`].
///
/// At least one of the dates is always present.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change {
    /// Only the [`StartDate`] changes.
    Start(StartDate),

    /// Only the [`EndDate`] changes.
    End(EndDate),

    /// Both dates change.
    Both(StartDate, EndDate),
}

impl Change {
    /// Creates a new [`Change`] out of the optionally provided dates.
    ///
    /// [`None`] is returned if neither of dates is provided.
    #[must_use]
    pub fn new(start: Option<StartDate>, end: Option<EndDate>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self::Both(start, end)),
            (Some(start), None) => Some(Self::Start(start)),
            (None, Some(end)) => Some(Self::End(end)),
            (None, None) => None,
        }
    }

    /// Returns the changed [`StartDate`], if any.
    #[must_use]
    pub fn start(&self) -> Option<StartDate> {
        match self {
            Self::Start(start) | Self::Both(start, _) => Some(*start),
            Self::End(_) => None,
        }
    }

    /// Returns the changed [`EndDate`], if any.
    #[must_use]
    pub fn end(&self) -> Option<EndDate> {
        match self {
            Self::End(end) | Self::Both(_, end) => Some(*end),
            Self::Start(_) => None,
        }
    }

    /// Checks that the changed dates are not in the past relatively to the
    /// given `today`: a start may be today, while an end must be later.
    ///
    /// # Errors
    ///
    /// If any of the changed dates is in the past.
    pub fn check_not_past(&self, today: Date) -> Result<(), PeriodError> {
        if self.end().is_some_and(|end| end.coerce::<()>() <= today) {
            return Err(PeriodError::EndNotInFuture);
        }
        if self.start().is_some_and(|start| start.coerce::<()>() < today) {
            return Err(PeriodError::StartInPast);
        }
        Ok(())
    }

    /// Applies this [`Change`] to the given [`Period`].
    ///
    /// # Errors
    ///
    /// If the resulting dates don't form a valid [`Period`].
    pub fn apply(&self, period: Period) -> Result<Period, PeriodError> {
        Period::new(
            self.start().unwrap_or(period.start),
            self.end().unwrap_or(period.end),
        )
    }
}

/// Error of forming a [`Period`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum PeriodError {
    /// [`StartDate`] is not strictly before [`EndDate`].
    #[display("start date must be before end date")]
    StartNotBeforeEnd,

    /// [`StartDate`] is before today.
    #[display("start date cannot be in the past")]
    StartInPast,

    /// [`EndDate`] is today or earlier.
    #[display("end date must be after today")]
    EndNotInFuture,
}

#[cfg(test)]
mod spec {
    use common::Date;

    use super::{Change, EndDate, Period, PeriodError, StartDate};

    fn start(s: &str) -> StartDate {
        s.parse().unwrap()
    }

    fn end(s: &str) -> EndDate {
        s.parse().unwrap()
    }

    fn today() -> Date {
        "2027-06-10".parse().unwrap()
    }

    #[test]
    fn period_requires_start_before_end() {
        assert!(Period::new(start("2027-06-11"), end("2027-06-12")).is_ok());

        assert_eq!(
            Period::new(start("2027-06-12"), end("2027-06-12")),
            Err(PeriodError::StartNotBeforeEnd),
        );
        assert_eq!(
            Period::new(start("2027-06-13"), end("2027-06-12")),
            Err(PeriodError::StartNotBeforeEnd),
        );
    }

    #[test]
    fn change_requires_any_date() {
        assert_eq!(Change::new(None, None), None);
        assert_eq!(
            Change::new(Some(start("2027-06-11")), None),
            Some(Change::Start(start("2027-06-11"))),
        );
        assert_eq!(
            Change::new(None, Some(end("2027-06-11"))),
            Some(Change::End(end("2027-06-11"))),
        );
    }

    #[test]
    fn change_keeps_unchanged_date() {
        let period = Period::new(start("2027-07-01"), end("2027-07-10")).unwrap();

        let changed = Change::End(end("2027-07-05")).apply(period).unwrap();
        assert_eq!(changed.start(), start("2027-07-01"));
        assert_eq!(changed.end(), end("2027-07-05"));

        assert_eq!(
            Change::Start(start("2027-07-10")).apply(period),
            Err(PeriodError::StartNotBeforeEnd),
        );
    }

    #[test]
    fn change_cannot_be_in_past() {
        assert_eq!(Change::Start(start("2027-06-10")).check_not_past(today()), Ok(()));
        assert_eq!(
            Change::Start(start("2027-06-09")).check_not_past(today()),
            Err(PeriodError::StartInPast),
        );
        assert_eq!(
            Change::End(end("2027-06-10")).check_not_past(today()),
            Err(PeriodError::EndNotInFuture),
        );
        assert_eq!(Change::End(end("2027-06-11")).check_not_past(today()), Ok(()));
    }
}
