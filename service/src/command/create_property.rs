//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{By, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{
    City, Country, Description, PhotoUrl, PostCode, Province, Street, Title,
};
use crate::{
    domain::{property, user, Property, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// ID of the [`User`] owning a new [`Property`].
    pub owner_id: user::Id,

    /// [`Title`] of a new [`Property`].
    pub title: property::Title,

    /// [`Description`] of a new [`Property`].
    pub description: property::Description,

    /// Thumbnail [`PhotoUrl`] of a new [`Property`].
    pub thumbnail_photo_url: property::PhotoUrl,

    /// Cover [`PhotoUrl`] of a new [`Property`].
    pub cover_photo_url: property::PhotoUrl,

    /// Price of a single night in a new [`Property`], in major units.
    pub cost_per_night: Money,

    /// [`Street`] of a new [`Property`].
    pub street: property::Street,

    /// [`City`] of a new [`Property`].
    pub city: property::City,

    /// [`Province`] of a new [`Property`].
    pub province: property::Province,

    /// [`PostCode`] of a new [`Property`].
    pub post_code: property::PostCode,

    /// [`Country`] of a new [`Property`].
    pub country: property::Country,

    /// Number of parking spaces in a new [`Property`].
    pub parking_spaces: property::Count,

    /// Number of bathrooms in a new [`Property`].
    pub number_of_bathrooms: property::Count,

    /// Number of bedrooms in a new [`Property`].
    pub number_of_bedrooms: property::Count,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<property::New>,
            Ok = Property,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            owner_id,
            title,
            description,
            thumbnail_photo_url,
            cover_photo_url,
            cost_per_night,
            street,
            city,
            province,
            post_code,
            country,
            parking_spaces,
            number_of_bathrooms,
            number_of_bedrooms,
        } = cmd;

        let cost_per_night = cost_per_night
            .to_minor_units()
            .ok_or(E::CostTooLarge(cost_per_night))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<Option<User>, _>::new(owner_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Insert(property::New {
                owner_id,
                title,
                description,
                thumbnail_photo_url,
                cover_photo_url,
                cost_per_night,
                street,
                city,
                province,
                post_code,
                country,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Owner [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    OwnerNotExists(#[error(not(source))] user::Id),

    /// Cost of a night is too large to be stored.
    #[display("`{_0}` cost per night is too large")]
    #[from(ignore)]
    CostTooLarge(#[error(not(source))] Money),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{property, user, User},
        infra::database::Memory,
        Command as _, Config, Service,
    };

    use super::{CreateProperty, ExecutionError};

    fn cmd(owner_id: user::Id, cost_per_night: &str) -> CreateProperty {
        CreateProperty {
            owner_id,
            title: property::Title::new("Speed lamp").unwrap(),
            description: property::Description::new("description").unwrap(),
            thumbnail_photo_url: property::PhotoUrl::new(
                "https://images.example.com/thumb.jpg",
            )
            .unwrap(),
            cover_photo_url: property::PhotoUrl::new(
                "https://images.example.com/cover.jpg",
            )
            .unwrap(),
            cost_per_night: cost_per_night.parse().unwrap(),
            street: property::Street::new("536 Namsub Highway").unwrap(),
            city: property::City::new("Sotboske").unwrap(),
            province: property::Province::new("Quebec").unwrap(),
            post_code: property::PostCode::new("28142").unwrap(),
            country: property::Country::new("Canada").unwrap(),
            parking_spaces: property::Count::new(3).unwrap(),
            number_of_bathrooms: property::Count::new(1).unwrap(),
            number_of_bedrooms: property::Count::new(2).unwrap(),
        }
    }

    fn with_owner() -> (Service<Memory>, user::Id) {
        let db = Memory::default();
        let id = user::Id::from(1);
        db.users.lock().unwrap().push(User {
            id,
            name: user::Name::new("Eva Stanley").unwrap(),
            email: user::Email::new("eva@example.com").unwrap(),
            password_hash: user::PasswordHash::new(
                &user::Password::new("password").unwrap(),
            ),
        });
        (Service::new(Config::default(), db), id)
    }

    #[tokio::test]
    async fn stores_cost_in_minor_units() {
        let (svc, owner_id) = with_owner();

        let property = svc.execute(cmd(owner_id, "93.50")).await.unwrap();

        assert_eq!(property.owner_id, owner_id);
        assert_eq!(property.cost_per_night.get(), 9350);
    }

    #[tokio::test]
    async fn requires_existing_owner() {
        let (svc, _) = with_owner();

        let missing = user::Id::from(2);
        let err = svc.execute(cmd(missing, "93")).await.unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::OwnerNotExists(id) if *id == missing,
            ),
            "{err}",
        );
        assert!(svc.database().properties.lock().unwrap().is_empty());
    }
}
