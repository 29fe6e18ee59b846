//! Requests sent to the API besides the
//! [`UpdateReservation`](service::command::UpdateReservation) command.

use service::{
    domain::user,
    read::{self, reservation::listing},
};

/// Reservation with its property, as shown in the listings.
pub type Listing = listing::Item;

/// Request for the guest's fulfilled reservations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FulfilledReservations {
    /// ID of the guest whose reservations are listed.
    pub guest_id: user::Id,

    /// Maximum number of [`Listing`]s to return.
    ///
    /// The API default is used if [`None`].
    pub limit: Option<read::Limit>,
}

impl FulfilledReservations {
    /// Requests the fulfilled reservations of the provided guest, limited by
    /// the API default.
    #[must_use]
    pub fn of(guest_id: user::Id) -> Self {
        Self {
            guest_id,
            limit: None,
        }
    }
}

/// Request for the guest's upcoming reservations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UpcomingReservations {
    /// ID of the guest whose reservations are listed.
    pub guest_id: user::Id,

    /// Maximum number of [`Listing`]s to return.
    ///
    /// The API default is used if [`None`].
    pub limit: Option<read::Limit>,
}

impl UpcomingReservations {
    /// Requests the upcoming reservations of the provided guest, limited by
    /// the API default.
    #[must_use]
    pub fn of(guest_id: user::Id) -> Self {
        Self {
            guest_id,
            limit: None,
        }
    }
}
