//! Reservation update form validation.

use std::fmt;

use common::{DateOf, DateTime};
use derive_more::{Deref, Display, IntoIterator};
use service::{
    command::UpdateReservation,
    domain::{property, reservation},
};

/// Data of the edited reservation embedded into the form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dataset {
    /// ID of the edited reservation.
    pub reservation_id: reservation::Id,

    /// Original start date of the edited reservation.
    pub start_date: reservation::StartDate,

    /// Original end date of the edited reservation.
    pub end_date: reservation::EndDate,

    /// ID of the reserved property.
    pub property_id: property::Id,
}

/// Values entered into the form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Input {
    /// Fragments of a new start date.
    pub start: DateFragments,

    /// Fragments of a new end date.
    pub end: DateFragments,
}

/// Date entered as separate day, month and year fields.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DateFragments {
    /// Day of a month.
    pub day: String,

    /// Month number, starting from `1`.
    pub month: String,

    /// Full year.
    pub year: String,
}

impl DateFragments {
    /// Creates new [`DateFragments`] out of the provided field values.
    #[must_use]
    pub fn new(
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// Indicates whether all the fields are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.day, &self.month, &self.year]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    /// Reconstructs a date out of these [`DateFragments`].
    ///
    /// [`None`] is returned if any of the fields is not filled.
    ///
    /// # Errors
    ///
    /// If the filled fields don't form an existing calendar date.
    pub fn date<Of: ?Sized>(&self) -> Result<Option<DateOf<Of>>, InvalidDate> {
        if !self.is_complete() {
            return Ok(None);
        }
        let year = self.year.trim().parse().map_err(|_| InvalidDate)?;
        let month = self.month.trim().parse().map_err(|_| InvalidDate)?;
        let day = self.day.trim().parse().map_err(|_| InvalidDate)?;
        DateOf::from_calendar(year, month, day)
            .map(Some)
            .ok_or(InvalidDate)
    }
}

/// Error of filled [`DateFragments`] not forming a calendar date.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("not a valid date")]
pub struct InvalidDate;

/// Violated rule of the form [`Input`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Violation {
    /// Complete start date doesn't exist in the calendar.
    #[display("Start date is not a valid date.")]
    InvalidStartDate,

    /// Complete end date doesn't exist in the calendar.
    #[display("End date is not a valid date.")]
    InvalidEndDate,

    /// Neither of dates is complete.
    #[display("Please provide either a complete start or end date.")]
    NoDates,

    /// New end date is not in the future.
    #[display("End date cannot be on or before today's date.")]
    EndNotInFuture,

    /// New start date is in the past.
    #[display("Start date cannot be before today's date.")]
    StartInPast,

    /// Only the end date changes, but not after the original start date.
    #[display("End date cannot be on or before the original start date.")]
    EndNotAfterOriginalStart,

    /// Only the start date changes, but not before the original end date.
    #[display("Start date cannot be on or after the original end date.")]
    StartNotBeforeOriginalEnd,

    /// Both dates change, but the start is not before the end.
    #[display("New start date cannot be on or after the new end date.")]
    StartNotBeforeEnd,
}

/// Non-empty list of [`Violation`]s in the order their rules are checked.
#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct Violations(Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut violations = self.0.iter();
        if let Some(first) = violations.next() {
            write!(f, "{first}")?;
        }
        for v in violations {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

/// Validates the form [`Input`] of the reservation described by the
/// [`Dataset`] at the `now` moment.
///
/// Dates are compared as the UTC midnights they start with.
///
/// # Errors
///
/// With all the [`Violations`] if the [`Input`] is invalid.
pub fn validate(
    input: &Input,
    dataset: &Dataset,
    now: DateTime,
) -> Result<UpdateReservation, Violations> {
    use Violation as V;

    let mut violations = vec![];

    let start: Option<reservation::StartDate> =
        input.start.date().unwrap_or_else(|_| {
            violations.push(V::InvalidStartDate);
            None
        });
    let end: Option<reservation::EndDate> =
        input.end.date().unwrap_or_else(|_| {
            violations.push(V::InvalidEndDate);
            None
        });
    let (start_given, end_given) =
        (input.start.is_complete(), input.end.is_complete());

    if !start_given && !end_given {
        violations.push(V::NoDates);
    }
    if end.is_some_and(|end| end.midnight::<()>() <= now) {
        violations.push(V::EndNotInFuture);
    }
    if start.is_some_and(|start| start.midnight::<()>() < now) {
        violations.push(V::StartInPast);
    }
    match (start, end) {
        (None, Some(end)) if !start_given => {
            if end.coerce::<()>() <= dataset.start_date.coerce() {
                violations.push(V::EndNotAfterOriginalStart);
            }
        }
        (Some(start), None) if !end_given => {
            if start.coerce::<()>() >= dataset.end_date.coerce() {
                violations.push(V::StartNotBeforeOriginalEnd);
            }
        }
        (Some(start), Some(end)) => {
            if start.coerce::<()>() >= end.coerce() {
                violations.push(V::StartNotBeforeEnd);
            }
        }
        _ => {}
    }

    if !violations.is_empty() {
        return Err(Violations(violations));
    }
    Ok(UpdateReservation {
        reservation_id: dataset.reservation_id,
        start_date: start,
        end_date: end,
    })
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{validate, DateFragments, Dataset, Input, Violation};

    fn now() -> DateTime {
        DateTime::from_rfc3339("2027-06-10T15:30:00Z").unwrap()
    }

    fn dataset() -> Dataset {
        Dataset {
            reservation_id: 4.into(),
            start_date: "2027-07-01".parse().unwrap(),
            end_date: "2027-07-10".parse().unwrap(),
            property_id: 9.into(),
        }
    }

    fn input(start: [&str; 3], end: [&str; 3]) -> Input {
        Input {
            start: DateFragments::new(start[0], start[1], start[2]),
            end: DateFragments::new(end[0], end[1], end[2]),
        }
    }

    fn violations(input: &Input) -> Vec<String> {
        violations_of(input, &dataset())
    }

    fn violations_of(input: &Input, dataset: &Dataset) -> Vec<String> {
        validate(input, dataset, now())
            .unwrap_err()
            .into_iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn requires_any_complete_date() {
        assert_eq!(
            violations(&input(["", "", ""], ["", "", ""])),
            ["Please provide either a complete start or end date."],
        );
        assert_eq!(
            violations(&input(["1", "", "2027"], ["5", "7", " "])),
            ["Please provide either a complete start or end date."],
        );
    }

    #[test]
    fn end_must_be_after_today() {
        let in_progress = Dataset {
            start_date: "2027-06-01".parse().unwrap(),
            end_date: "2027-06-20".parse().unwrap(),
            ..dataset()
        };

        assert_eq!(
            violations_of(
                &input(["", "", ""], ["10", "6", "2027"]),
                &in_progress,
            ),
            ["End date cannot be on or before today's date."],
        );
    }

    #[test]
    fn start_cannot_be_before_today() {
        assert_eq!(
            violations(&input(["9", "6", "2027"], ["", "", ""])),
            ["Start date cannot be before today's date."],
        );
    }

    #[test]
    fn end_only_must_be_after_original_start() {
        assert_eq!(
            violations(&input(["", "", ""], ["1", "7", "2027"])),
            ["End date cannot be on or before the original start date."],
        );
    }

    #[test]
    fn start_only_must_be_before_original_end() {
        assert_eq!(
            violations(&input(["10", "7", "2027"], ["", "", ""])),
            ["Start date cannot be on or after the original end date."],
        );
    }

    #[test]
    fn new_start_must_be_before_new_end() {
        assert_eq!(
            violations(&input(["20", "8", "2027"], ["20", "8", "2027"])),
            ["New start date cannot be on or after the new end date."],
        );
    }

    #[test]
    fn rejects_non_calendar_dates() {
        assert_eq!(
            violations(&input(["31", "2", "2027"], ["", "", ""])),
            ["Start date is not a valid date."],
        );
        assert_eq!(
            violations(&input(["", "", ""], ["1", "July", "2027"])),
            ["End date is not a valid date."],
        );
    }

    #[test]
    fn collects_violations_in_rule_order() {
        let err = validate(
            &input(["1", "6", "2027"], ["1", "5", "2027"]),
            &dataset(),
            now(),
        )
        .unwrap_err();

        assert_eq!(
            err.as_slice(),
            [
                Violation::EndNotInFuture,
                Violation::StartInPast,
                Violation::StartNotBeforeEnd,
            ],
        );
        assert_eq!(err.first(), Some(&Violation::EndNotInFuture));
    }

    #[test]
    fn builds_partial_request() {
        let request = validate(
            &input(["", "", ""], ["05", "07", "2027"]),
            &dataset(),
            now(),
        )
        .unwrap();

        assert_eq!(request.reservation_id, dataset().reservation_id);
        assert_eq!(request.start_date, None);
        assert_eq!(
            request.end_date.map(|d| d.to_string()).as_deref(),
            Some("2027-07-05"),
        );
    }

    #[test]
    fn start_may_be_tomorrow() {
        let request = validate(
            &input(["11", "6", "2027"], ["15", "6", "2027"]),
            &dataset(),
            now(),
        )
        .unwrap();

        assert_eq!(
            request.start_date.map(|d| d.to_string()).as_deref(),
            Some("2027-06-11"),
        );
    }
}
