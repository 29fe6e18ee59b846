//! Test doubles of the [`Client`] collaborators.
//!
//! [`Client`]: crate::Client

use std::sync::Mutex;

use common::Handler;
use service::{
    command::UpdateReservation,
    domain::{user, Reservation},
};

use crate::{
    api::{FulfilledReservations, Listing, UpcomingReservations},
    View, ViewManager,
};

/// API recording the received requests.
#[derive(Debug, Default)]
pub(crate) struct Api {
    /// Indicator whether every request fails.
    pub(crate) unavailable: bool,

    /// Indicator whether the listings requests fail.
    pub(crate) listings_unavailable: bool,

    /// Names of the received requests in order.
    pub(crate) requests: Mutex<Vec<&'static str>>,

    /// IDs of the guests whose listings were requested.
    pub(crate) listed_guests: Mutex<Vec<user::Id>>,
}

impl Api {
    /// Records the request with the provided `name`.
    fn receive(&self, name: &'static str) -> Result<(), String> {
        self.requests.lock().unwrap().push(name);
        if self.unavailable {
            return Err("connection refused".into());
        }
        Ok(())
    }

    /// Records the listings request of the provided guest.
    fn list(
        &self,
        name: &'static str,
        guest_id: user::Id,
    ) -> Result<Vec<Listing>, String> {
        self.receive(name)?;
        self.listed_guests.lock().unwrap().push(guest_id);
        if self.listings_unavailable {
            return Err("timeout".into());
        }
        Ok(vec![])
    }
}

impl Handler<UpdateReservation> for Api {
    type Ok = Reservation;
    type Err = String;

    async fn execute(
        &self,
        req: UpdateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        self.receive("update")?;
        Ok(Reservation {
            id: req.reservation_id,
            property_id: 1.into(),
            guest_id: 3.into(),
            start_date: req
                .start_date
                .unwrap_or_else(|| "2999-01-01".parse().unwrap()),
            end_date: req
                .end_date
                .unwrap_or_else(|| "2999-12-31".parse().unwrap()),
        })
    }
}

impl Handler<FulfilledReservations> for Api {
    type Ok = Vec<Listing>;
    type Err = String;

    async fn execute(
        &self,
        req: FulfilledReservations,
    ) -> Result<Self::Ok, Self::Err> {
        self.list("fulfilled", req.guest_id)
    }
}

impl Handler<UpcomingReservations> for Api {
    type Ok = Vec<Listing>;
    type Err = String;

    async fn execute(
        &self,
        req: UpcomingReservations,
    ) -> Result<Self::Ok, Self::Err> {
        self.list("upcoming", req.guest_id)
    }
}

/// [`ViewManager`] recording the shown [`View`]s.
#[derive(Debug, Default)]
pub(crate) struct Views(pub(crate) Mutex<Vec<View>>);

impl ViewManager for Views {
    fn show(&self, view: View) {
        self.0.lock().unwrap().push(view);
    }
}
