//! Client tier of reservation management: validates the reservation update
//! form and drives the views around the update request.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod form;
pub mod view;

#[cfg(test)]
mod mock;

use std::{convert::Infallible, fmt};

use common::{DateTime, Handler};
use derive_more::{Display, Error};
use service::{
    command,
    domain::{user, Reservation},
};
use tracing as log;

pub use self::{
    form::{Dataset, Input, Violation, Violations},
    view::{View, ViewManager},
};

/// Reservation update form submission.
#[derive(Clone, Debug)]
pub struct Submit {
    /// [`Dataset`] of the edited reservation embedded into the form.
    pub dataset: Dataset,

    /// [`Input`] entered into the form.
    pub input: Input,
}

/// Reservation update form cancellation.
#[derive(Clone, Copy, Debug)]
pub struct Cancel;

/// Client driving the reservation update form.
#[derive(Clone, Copy, Debug)]
pub struct Client<Api, Views> {
    /// API the update requests are sent to.
    api: Api,

    /// [`ViewManager`] switching the visible [`View`]s.
    views: Views,
}

impl<Api, Views> Client<Api, Views> {
    /// Creates a new [`Client`] out of the provided API and [`ViewManager`].
    #[must_use]
    pub fn new(api: Api, views: Views) -> Self {
        Self { api, views }
    }

    /// Returns the API of this [`Client`].
    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Returns the [`ViewManager`] of this [`Client`].
    #[must_use]
    pub fn views(&self) -> &Views {
        &self.views
    }
}

impl<Api, Views> Client<Api, Views>
where
    Api: Handler<command::UpdateReservation, Ok = Reservation>
        + Handler<api::FulfilledReservations, Ok = Vec<api::Listing>>
        + Handler<api::UpcomingReservations, Ok = Vec<api::Listing>>,
    <Api as Handler<command::UpdateReservation>>::Err: fmt::Display,
    <Api as Handler<api::FulfilledReservations>>::Err: fmt::Display,
    <Api as Handler<api::UpcomingReservations>>::Err: fmt::Display,
    Views: ViewManager,
{
    /// Fetches both listings of the provided guest.
    async fn refresh(
        &self,
        guest_id: user::Id,
    ) -> Result<view::Listings, SubmitError> {
        let fulfilled = self
            .api
            .execute(api::FulfilledReservations::of(guest_id))
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;
        let upcoming = self
            .api
            .execute(api::UpcomingReservations::of(guest_id))
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;
        Ok(view::Listings {
            fulfilled,
            upcoming,
        })
    }
}

impl<Api, Views> Handler<Submit> for Client<Api, Views>
where
    Api: Handler<command::UpdateReservation, Ok = Reservation>
        + Handler<api::FulfilledReservations, Ok = Vec<api::Listing>>
        + Handler<api::UpcomingReservations, Ok = Vec<api::Listing>>,
    <Api as Handler<command::UpdateReservation>>::Err: fmt::Display,
    <Api as Handler<api::FulfilledReservations>>::Err: fmt::Display,
    <Api as Handler<api::UpcomingReservations>>::Err: fmt::Display,
    Views: ViewManager,
{
    type Ok = Reservation;
    type Err = SubmitError;

    async fn execute(&self, submit: Submit) -> Result<Self::Ok, Self::Err> {
        let Submit { dataset, input } = submit;

        self.views.show(View::None);

        let request = match form::validate(&input, &dataset, DateTime::now()) {
            Ok(request) => request,
            Err(violations) => {
                log::debug!("invalid reservation update: {violations}");
                self.views.show(View::UpdateReservation(view::UpdateForm::new(
                    &dataset,
                    violations.clone(),
                )));
                return Err(SubmitError::Invalid(violations));
            }
        };

        let updated = match self.api.execute(request).await {
            Ok(updated) => updated,
            Err(e) => {
                log::error!("failed to update reservation: {e}");
                self.views.show(View::Listings(None));
                return Err(SubmitError::Request(e.to_string()));
            }
        };
        log::debug!("updated reservation: {}", updated.id);

        self.views.show(View::None);
        match self.refresh(updated.guest_id).await {
            Ok(listings) => self.views.show(View::Listings(Some(listings))),
            Err(e) => {
                log::warn!("failed to refresh reservation listings: {e}");
                self.views.show(View::Listings(None));
            }
        }
        Ok(updated)
    }
}

impl<Api, Views> Handler<Cancel> for Client<Api, Views>
where
    Views: ViewManager,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: Cancel) -> Result<Self::Ok, Self::Err> {
        self.views.show(View::Listings(None));
        Ok(())
    }
}

/// Error of a [`Submit`] execution.
///
/// The appropriate [`View`] is already shown once it's returned.
#[derive(Clone, Debug, Display, Error)]
pub enum SubmitError {
    /// Form [`Input`] is invalid, so no request has been sent.
    #[display("Invalid form input: {_0}")]
    Invalid(#[error(not(source))] Violations),

    /// Update request to the API failed, so the reservation is unchanged.
    ///
    /// A failed refresh of the listings after a successful update is not
    /// reported as an error.
    #[display("Request failed: {_0}")]
    Request(#[error(not(source))] String),
}

#[cfg(test)]
mod spec {
    use common::Handler as _;

    use crate::{
        form::DateFragments,
        mock::{Api, Views},
        view::UpdateForm,
        Cancel, Client, Dataset, Input, SubmitError, View,
    };

    fn dataset() -> Dataset {
        Dataset {
            reservation_id: 4.into(),
            start_date: "2999-07-01".parse().unwrap(),
            end_date: "2999-07-10".parse().unwrap(),
            property_id: 9.into(),
        }
    }

    fn submit(start: DateFragments, end: DateFragments) -> super::Submit {
        super::Submit {
            dataset: dataset(),
            input: Input { start, end },
        }
    }

    #[tokio::test]
    async fn rerenders_form_on_invalid_input() {
        let client = Client::new(Api::default(), Views::default());

        let err = client
            .execute(submit(DateFragments::default(), DateFragments::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)), "{err}");
        assert!(client.api().requests.lock().unwrap().is_empty());

        let views = client.views().0.lock().unwrap();
        assert_eq!(views.len(), 2, "{views:?}");
        assert!(matches!(views[0], View::None), "{views:?}");
        let View::UpdateReservation(UpdateForm {
            id,
            start_date,
            error_message,
            ..
        }) = &views[1]
        else {
            panic!("update form expected: {views:?}");
        };
        assert_eq!(*id, dataset().reservation_id);
        assert_eq!(*start_date, dataset().start_date);
        assert_eq!(
            error_message.as_deref(),
            Some("Please provide either a complete start or end date."),
        );
    }

    #[tokio::test]
    async fn refreshes_listings_on_success() {
        let client = Client::new(Api::default(), Views::default());

        let updated = client
            .execute(submit(
                DateFragments::default(),
                DateFragments::new("5", "7", "2999"),
            ))
            .await
            .unwrap();

        assert_eq!(updated.id, dataset().reservation_id);
        assert_eq!(updated.end_date.to_string(), "2999-07-05");
        assert_eq!(
            *client.api().requests.lock().unwrap(),
            ["update", "fulfilled", "upcoming"],
        );
        assert_eq!(
            *client.api().listed_guests.lock().unwrap(),
            [updated.guest_id, updated.guest_id],
        );

        let views = client.views().0.lock().unwrap();
        assert_eq!(views.len(), 3, "{views:?}");
        assert!(matches!(views[0], View::None), "{views:?}");
        assert!(matches!(views[1], View::None), "{views:?}");
        assert!(matches!(views[2], View::Listings(Some(_))), "{views:?}");
    }

    #[tokio::test]
    async fn keeps_update_when_refresh_fails() {
        let client = Client::new(
            Api {
                listings_unavailable: true,
                ..Api::default()
            },
            Views::default(),
        );

        let updated = client
            .execute(submit(
                DateFragments::default(),
                DateFragments::new("5", "7", "2999"),
            ))
            .await
            .unwrap();

        assert_eq!(updated.id, dataset().reservation_id);
        assert_eq!(updated.end_date.to_string(), "2999-07-05");
        assert_eq!(
            *client.api().requests.lock().unwrap(),
            ["update", "fulfilled"],
        );

        let views = client.views().0.lock().unwrap();
        assert_eq!(views.len(), 3, "{views:?}");
        assert!(matches!(views[1], View::None), "{views:?}");
        assert!(matches!(views[2], View::Listings(None)), "{views:?}");
    }

    #[tokio::test]
    async fn falls_back_to_listings_on_failure() {
        let client = Client::new(
            Api {
                unavailable: true,
                ..Api::default()
            },
            Views::default(),
        );

        let err = client
            .execute(submit(
                DateFragments::new("2", "7", "2999"),
                DateFragments::default(),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Request(_)), "{err}");
        assert_eq!(*client.api().requests.lock().unwrap(), ["update"]);

        let views = client.views().0.lock().unwrap();
        assert_eq!(views.len(), 2, "{views:?}");
        assert!(matches!(views[0], View::None), "{views:?}");
        assert!(matches!(views[1], View::Listings(None)), "{views:?}");
    }

    #[tokio::test]
    async fn cancel_shows_listings() {
        let client = Client::new(Api::default(), Views::default());

        client.execute(Cancel).await.unwrap();

        assert!(client.api().requests.lock().unwrap().is_empty());
        let views = client.views().0.lock().unwrap();
        assert!(matches!(views[..], [View::Listings(None)]), "{views:?}");
    }
}
