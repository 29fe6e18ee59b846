//! [`User`]-related definitions.

use std::future;

use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{
    domain, query,
    read::{self, reservation::listing},
    Query as _,
};
use tokio::sync::OnceCell;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`User`] of the system.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`domain::User`] representing this [`User`].
    user: OnceCell<domain::User>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            user: OnceCell::new_with(Some(user)),
        }
    }
}

impl User {
    /// Creates a new [`User`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`User`] with the provided ID exists,
    /// otherwise accessing this [`User`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            user: OnceCell::new(),
        }
    }

    /// Returns the [`domain::User`] representing this [`User`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::User`] doesn't exist.
    async fn user(&self, ctx: &Context) -> Result<&domain::User, Error> {
        let id = self.id.into();
        self.user
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|u| {
                        future::ready(u.ok_or_else(|| {
                            api::query::UserError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A `User` of the system, either a guest or a property owner.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.user(ctx).await?.name.clone().into())
    }

    /// Email of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Email, Error> {
        Ok(self.user(ctx).await?.email.clone().into())
    }

    /// Reviewed `Property`s listed by this `User`, cheapest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.properties",
            limit = ?limit,
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn properties(
        &self,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::property::Listing>, Error> {
        let options = read::property::search::Options {
            owner_id: Some(self.id.into()),
            ..read::property::search::Options::default()
        };
        api::Query::search(options, api::limit(limit, ctx)?, ctx).await
    }

    /// `Reservation`s of this `User` started today or earlier.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.fulfilledReservations",
            limit = ?limit,
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn fulfilled_reservations(
        &self,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Listing>, Error> {
        let selector = listing::Selector::fulfilled(
            self.id.into(),
            api::limit(limit, ctx)?,
        );
        api::Query::reservations(selector, ctx).await
    }

    /// `Reservation`s of this `User` starting after today.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LIMIT` - the provided `limit` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.upcomingReservations",
            limit = ?limit,
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn upcoming_reservations(
        &self,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Listing>, Error> {
        let selector = listing::Selector::upcoming(
            self.id.into(),
            api::limit(limit, ctx)?,
        );
        api::Query::reservations(selector, ctx).await
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(i32);

/// Name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Via::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Password of a `User`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPassword",
    with = scalar::Via::<domain::user::Password>,
)]
pub struct Password(domain::user::Password);

/// Email of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserEmail",
    with = scalar::Via::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);
