//! [`Reservation`]-related definitions.

use common::{Date, Rating};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, read};

use crate::{api, Context};

/// A [`Reservation`] of a [`api::Property`] made by a guest [`api::User`].
#[derive(Clone, Debug, From)]
pub struct Reservation(domain::Reservation);

/// Booked date range of a `Property` by a guest `User`.
#[graphql_object(context = Context)]
impl Reservation {
    /// Unique identifier of this `Reservation`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Reserved `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn property(&self) -> api::Property {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::Property::new_unchecked(self.0.property_id)
        }
    }

    /// Guest `User` this `Reservation` is made by.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.guest",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn guest(&self) -> api::User {
        #[expect(unsafe_code, reason = "referenced by foreign key")]
        unsafe {
            api::User::new_unchecked(self.0.guest_id)
        }
    }

    /// Date this `Reservation` starts at.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.0.start_date.coerce()
    }

    /// Date this `Reservation` ends at.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.0.end_date.coerce()
    }
}

/// [`Reservation`] listed along with its [`api::Property`] details.
#[derive(Clone, Debug)]
pub struct Listing {
    /// Listed [`Reservation`].
    reservation: Reservation,

    /// Reserved [`api::Property`].
    property: api::Property,

    /// Average [`Rating`] of the reserved [`api::Property`].
    average_rating: Rating,
}

impl From<read::reservation::listing::Item> for Listing {
    fn from(item: read::reservation::listing::Item) -> Self {
        let read::reservation::listing::Item {
            reservation,
            property,
            average_rating,
        } = item;
        Self {
            reservation: reservation.into(),
            property: property.into(),
            average_rating,
        }
    }
}

/// `Reservation` of a guest listed along with its `Property` details.
#[graphql_object(name = "ReservationListing", context = Context)]
impl Listing {
    /// Listed `Reservation`.
    #[must_use]
    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    /// Reserved `Property`.
    #[must_use]
    pub fn property(&self) -> &api::Property {
        &self.property
    }

    /// Average rating of the reserved `Property` reviews.
    #[must_use]
    pub fn average_rating(&self) -> Rating {
        self.average_rating
    }
}

/// Unique identifier of a `Reservation`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::reservation::Id)]
#[into(domain::reservation::Id)]
#[graphql(name = "ReservationId", transparent)]
pub struct Id(i32);
