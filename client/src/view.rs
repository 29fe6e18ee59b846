//! [`View`] definitions.

use service::domain::{property, reservation};

use crate::{api::Listing, form::Dataset, Violations};

/// Visible state of the UI.
#[derive(Clone, Debug)]
pub enum View {
    /// Nothing is shown, while a request is in flight.
    None,

    /// Reservation listings.
    ///
    /// [`None`] keeps the currently rendered listings intact.
    Listings(Option<Listings>),

    /// Reservation update form.
    UpdateReservation(UpdateForm),
}

/// Switcher of the visible [`View`].
pub trait ViewManager {
    /// Shows the provided [`View`] instead of the current one.
    fn show(&self, view: View);
}

impl<T: ViewManager + ?Sized> ViewManager for &T {
    fn show(&self, view: View) {
        (**self).show(view);
    }
}

/// Guest's reservations, split by their timeframe.
#[derive(Clone, Debug, Default)]
pub struct Listings {
    /// Reservations started today or earlier.
    pub fulfilled: Vec<Listing>,

    /// Reservations starting after today.
    pub upcoming: Vec<Listing>,
}

/// Reservation update form, pre-filled with the original reservation.
#[derive(Clone, Debug)]
pub struct UpdateForm {
    /// ID of the edited reservation.
    pub id: reservation::Id,

    /// Original start date of the edited reservation.
    pub start_date: reservation::StartDate,

    /// Original end date of the edited reservation.
    pub end_date: reservation::EndDate,

    /// ID of the reserved property.
    pub property_id: property::Id,

    /// Message of the first [`Violation`], if any.
    ///
    /// [`Violation`]: crate::Violation
    pub error_message: Option<String>,

    /// All the [`Violations`] of the previous submission.
    pub violations: Violations,
}

impl UpdateForm {
    /// Creates a new [`UpdateForm`] re-rendering the provided [`Dataset`]
    /// along with its [`Violations`].
    #[must_use]
    pub fn new(dataset: &Dataset, violations: Violations) -> Self {
        Self {
            id: dataset.reservation_id,
            start_date: dataset.start_date,
            end_date: dataset.end_date,
            property_id: dataset.property_id,
            error_message: violations.first().map(ToString::to_string),
            violations,
        }
    }
}
