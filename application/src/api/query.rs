//! GraphQL [`Query`]s definitions.

use common::{Money, Rating};
use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified email.
    ///
    /// Emails are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - no `User` has the specified email.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "userByEmail",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user_by_email(
        email: api::user::Email,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ByEmail::by(email.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "property",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PropertyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Searches `Property`s matching all the provided options, cheapest
    /// first.
    ///
    /// Prices are accepted in major currency units.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "properties",
            limit = ?limit,
            maximum_price_per_night = ?maximum_price_per_night,
            minimum_price_per_night = ?minimum_price_per_night,
            minimum_rating = ?minimum_rating,
            otel.name = Self::SPAN_NAME,
            owner_id = ?owner_id,
        ),
    )]
    pub async fn properties(
        city: Option<api::property::City>,
        owner_id: Option<api::user::Id>,
        minimum_price_per_night: Option<Money>,
        maximum_price_per_night: Option<Money>,
        minimum_rating: Option<Rating>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::property::Listing>, Error> {
        let limit = api::limit(limit, ctx)?;

        Self::search(
            read::property::search::Options {
                city: city.map(Into::into),
                owner_id: owner_id.map(Into::into),
                minimum_price_per_night,
                maximum_price_per_night,
                minimum_rating,
            },
            limit,
            ctx,
        )
        .await
    }

    /// Returns the `Reservation` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RESERVATION_NOT_EXISTS` - the `Reservation` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "reservation",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(query::reservation::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ReservationError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the guest's `Reservation`s started today or earlier, ordered
    /// by their start dates.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "fulfilledReservations",
            guest_id = %guest_id,
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn fulfilled_reservations(
        guest_id: api::user::Id,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Listing>, Error> {
        let limit = api::limit(limit, ctx)?;

        Self::reservations(
            read::reservation::listing::Selector::fulfilled(
                guest_id.into(),
                limit,
            ),
            ctx,
        )
        .await
    }

    /// Returns the guest's `Reservation`s starting after today, ordered by
    /// their start dates.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "upcomingReservations",
            guest_id = %guest_id,
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn upcoming_reservations(
        guest_id: api::user::Id,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Listing>, Error> {
        let limit = api::limit(limit, ctx)?;

        Self::reservations(
            read::reservation::listing::Selector::upcoming(
                guest_id.into(),
                limit,
            ),
            ctx,
        )
        .await
    }
}

impl Query {
    /// Searches `Property`s matching the provided
    /// [`read::property::search::Options`].
    pub(crate) async fn search(
        options: read::property::search::Options,
        limit: read::Limit,
        ctx: &Context,
    ) -> Result<Vec<api::property::Listing>, Error> {
        ctx.service()
            .execute(query::properties::Search::by(
                read::property::search::Selector { options, limit },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }

    /// Lists the guest's `Reservation`s matching the provided
    /// [`read::reservation::listing::Selector`].
    pub(crate) async fn reservations(
        selector: read::reservation::listing::Selector,
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Listing>, Error> {
        ctx.service()
            .execute(query::reservations::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| items.into_iter().map(Into::into).collect())
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReservationError {
        #[code = "RESERVATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reservation` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` does not exist"]
        NotExists,
    }
}
