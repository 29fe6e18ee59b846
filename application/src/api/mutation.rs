//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money};
use juniper::graphql_object;
use service::{command, domain::reservation, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Registers a new `User` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `UserEmail` is occupied by another
    ///                      `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createUser",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        email: api::user::Email,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists a new `Property` of the specified owner.
    ///
    /// The `costPerNight` is accepted in major currency units.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OWNER_NOT_EXISTS` - the owner `User` does not exist;
    /// - `COST_TOO_LARGE` - the `costPerNight` cannot be stored.
    #[tracing::instrument(
        skip_all,
        fields(
            city = %city,
            cost_per_night = %cost_per_night,
            gql.name = "createProperty",
            otel.name = Self::SPAN_NAME,
            owner_id = %owner_id,
            title = %title,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_property(
        owner_id: api::user::Id,
        title: api::property::Title,
        description: api::property::Description,
        thumbnail_photo_url: api::property::PhotoUrl,
        cover_photo_url: api::property::PhotoUrl,
        cost_per_night: Money,
        street: api::property::Street,
        city: api::property::City,
        province: api::property::Province,
        post_code: api::property::PostCode,
        country: api::property::Country,
        parking_spaces: api::property::Count,
        number_of_bathrooms: api::property::Count,
        number_of_bedrooms: api::property::Count,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::CreateProperty {
                owner_id: owner_id.into(),
                title: title.into(),
                description: description.into(),
                thumbnail_photo_url: thumbnail_photo_url.into(),
                cover_photo_url: cover_photo_url.into(),
                cost_per_night,
                street: street.into(),
                city: city.into(),
                province: province.into(),
                post_code: post_code.into(),
                country: country.into(),
                parking_spaces: parking_spaces.into(),
                number_of_bathrooms: number_of_bathrooms.into(),
                number_of_bedrooms: number_of_bedrooms.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Reserves the specified `Property` for the specified guest `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_RESERVATION_PERIOD` - the dates don't form a valid period;
    /// - `PROPERTY_NOT_EXISTS` - the `Property` does not exist;
    /// - `GUEST_NOT_EXISTS` - the guest `User` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            end_date = %end_date,
            gql.name = "createReservation",
            guest_id = %guest_id,
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
            start_date = %start_date,
        ),
    )]
    pub async fn create_reservation(
        property_id: api::property::Id,
        guest_id: api::user::Id,
        start_date: Date,
        end_date: Date,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::CreateReservation {
                property_id: property_id.into(),
                guest_id: guest_id.into(),
                start_date: start_date.coerce(),
                end_date: end_date.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the dates of the specified `Reservation`.
    ///
    /// Only the provided dates are changed, while at least one of them must
    /// be provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOTHING_TO_UPDATE` - neither of dates is provided;
    /// - `INVALID_RESERVATION_PERIOD` - the resulting dates don't form a valid
    ///                                  period;
    /// - `RESERVATION_NOT_EXISTS` - the `Reservation` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            end_date = ?end_date,
            gql.name = "updateReservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
            start_date = ?start_date,
        ),
    )]
    pub async fn update_reservation(
        id: api::reservation::Id,
        start_date: Option<Date>,
        end_date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::UpdateReservation {
                reservation_id: id.into(),
                start_date: start_date.map(Date::coerce),
                end_date: end_date.map(Date::coerce),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels the specified `Reservation`, returning it as it was.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RESERVATION_NOT_EXISTS` - the `Reservation` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteReservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::DeleteReservation {
                reservation_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserEmail` is occupied by another `User`"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OWNER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Owner `User` does not exist"]
                OwnerNotExists,

                #[code = "COST_TOO_LARGE"]
                #[status = BAD_REQUEST]
                #[message = "Cost per night is too large"]
                CostTooLarge,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(Error::OwnerNotExists.into()),
            Self::CostTooLarge(_) => Some(Error::CostTooLarge.into()),
        }
    }
}

impl AsError for command::create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PROPERTY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Property` does not exist"]
                PropertyNotExists,

                #[code = "GUEST_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Guest `User` does not exist"]
                GuestNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPeriod(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(Error::PropertyNotExists.into())
            }
            Self::GuestNotExists(_) => Some(Error::GuestNotExists.into()),
        }
    }
}

impl AsError for command::update_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOTHING_TO_UPDATE"]
                #[status = BAD_REQUEST]
                #[message = "Either start or end date must be provided"]
                NothingToUpdate,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NothingToUpdate => Some(Error::NothingToUpdate.into()),
            Self::InvalidPeriod(e) => e.try_as_error(),
            Self::ReservationNotExists(_) => {
                Some(api::query::ReservationError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReservationNotExists(_) => {
                Some(api::query::ReservationError::NotExists.into())
            }
        }
    }
}

impl AsError for reservation::PeriodError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "INVALID_RESERVATION_PERIOD",
            http::StatusCode::BAD_REQUEST,
            self,
        ))
    }
}
