//! [`Command`] for creating a new [`Reservation`].

use common::{
    operations::{By, Insert, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::reservation::{EndDate, StartDate};
use crate::{
    domain::{property, reservation, user, Property, Reservation, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Reservation`].
#[derive(Clone, Copy, Debug)]
pub struct CreateReservation {
    /// ID of the [`Property`] to reserve.
    pub property_id: property::Id,

    /// ID of the guest [`User`] making a new [`Reservation`].
    pub guest_id: user::Id,

    /// [`StartDate`] of a new [`Reservation`].
    pub start_date: reservation::StartDate,

    /// [`EndDate`] of a new [`Reservation`].
    pub end_date: reservation::EndDate,
}

impl<Db> Command<CreateReservation> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<reservation::New>,
            Ok = Reservation,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            property_id,
            guest_id,
            start_date,
            end_date,
        } = cmd;

        reservation::Change::Both(start_date, end_date)
            .check_not_past(Date::today())
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let period = reservation::Period::new(start_date, end_date)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;
        self.database()
            .execute(Select(By::<Option<User>, _>::new(guest_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::GuestNotExists(guest_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Insert(reservation::New {
                property_id,
                guest_id,
                period,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Dates don't form a valid [`reservation::Period`].
    #[display("Invalid `Reservation` period: {_0}")]
    InvalidPeriod(reservation::PeriodError),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Guest [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    GuestNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::CreateProperty,
        domain::{property, user, User},
        infra::database::Memory,
        Command as _, Config, Service,
    };

    use super::{CreateReservation, ExecutionError};

    async fn service() -> (Service<Memory>, property::Id, user::Id) {
        let db = Memory::default();
        let guest_id = user::Id::from(1);
        db.users.lock().unwrap().push(User {
            id: guest_id,
            name: user::Name::new("Sue Luna").unwrap(),
            email: user::Email::new("sue@example.com").unwrap(),
            password_hash: user::PasswordHash::new(
                &user::Password::new("password").unwrap(),
            ),
        });
        let svc = Service::new(Config::default(), db);

        let property = svc
            .execute(CreateProperty {
                owner_id: guest_id,
                title: property::Title::new("Blank corner").unwrap(),
                description: property::Description::new("description")
                    .unwrap(),
                thumbnail_photo_url: property::PhotoUrl::new("thumb.jpg")
                    .unwrap(),
                cover_photo_url: property::PhotoUrl::new("cover.jpg").unwrap(),
                cost_per_night: "85.34".parse().unwrap(),
                street: property::Street::new("651 Nami Road").unwrap(),
                city: property::City::new("Bohbatev").unwrap(),
                province: property::Province::new("Alberta").unwrap(),
                post_code: property::PostCode::new("83680").unwrap(),
                country: property::Country::new("Canada").unwrap(),
                parking_spaces: property::Count::new(6).unwrap(),
                number_of_bathrooms: property::Count::new(4).unwrap(),
                number_of_bedrooms: property::Count::new(8).unwrap(),
            })
            .await
            .unwrap();

        (svc, property.id, guest_id)
    }

    #[tokio::test]
    async fn creates_reservation() {
        let (svc, property_id, guest_id) = service().await;

        let reservation = svc
            .execute(CreateReservation {
                property_id,
                guest_id,
                start_date: "2099-09-13".parse().unwrap(),
                end_date: "2099-09-26".parse().unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(reservation.property_id, property_id);
        assert_eq!(reservation.start_date.to_string(), "2099-09-13");
        assert_eq!(reservation.end_date.to_string(), "2099-09-26");
    }

    #[tokio::test]
    async fn rejects_inverted_period() {
        let (svc, property_id, guest_id) = service().await;

        let err = svc
            .execute(CreateReservation {
                property_id,
                guest_id,
                start_date: "2099-09-26".parse().unwrap(),
                end_date: "2099-09-13".parse().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::InvalidPeriod(_)),
            "{err}",
        );
    }

    #[tokio::test]
    async fn rejects_past_period() {
        let (svc, property_id, guest_id) = service().await;

        let err = svc
            .execute(CreateReservation {
                property_id,
                guest_id,
                start_date: "2018-09-13".parse().unwrap(),
                end_date: "2018-09-26".parse().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::InvalidPeriod(_)),
            "{err}",
        );
    }

    #[tokio::test]
    async fn requires_existing_property() {
        let (svc, _, guest_id) = service().await;

        let err = svc
            .execute(CreateReservation {
                property_id: 42.into(),
                guest_id,
                start_date: "2099-09-13".parse().unwrap(),
                end_date: "2099-09-26".parse().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::PropertyNotExists(_)),
            "{err}",
        );
        assert!(svc.database().reservations.lock().unwrap().is_empty());
    }
}
