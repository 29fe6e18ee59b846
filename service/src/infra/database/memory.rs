//! In-memory [`Database`] used in tests.

use std::sync::Mutex;

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{property, reservation, user, Property, Reservation, User},
    infra::database::{self, Database},
};

/// In-memory [`Database`] storing rows in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Memory {
    /// Stored [`User`]s.
    pub(crate) users: Mutex<Vec<User>>,

    /// Stored [`Property`]s.
    pub(crate) properties: Mutex<Vec<Property>>,

    /// Stored [`Reservation`]s.
    pub(crate) reservations: Mutex<Vec<Reservation>>,
}

/// Returns the next serial ID for a table of the provided `len`.
fn next_id<Id: From<i32>>(len: usize) -> Id {
    Id::from(i32::try_from(len).unwrap() + 1)
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

impl Database<Select<By<Option<User>, user::Email>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

impl Database<Insert<user::New>> for Memory {
    type Ok = User;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<user::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: next_id(users.len()),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
        };
        users.push(user.clone());
        Ok(user)
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .properties
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

impl Database<Insert<property::New>> for Memory {
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<property::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut properties = self.properties.lock().unwrap();
        let property = Property {
            id: next_id(properties.len()),
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            thumbnail_photo_url: new.thumbnail_photo_url,
            cover_photo_url: new.cover_photo_url,
            cost_per_night: new.cost_per_night,
            street: new.street,
            city: new.city,
            province: new.province,
            post_code: new.post_code,
            country: new.country,
            parking_spaces: new.parking_spaces,
            number_of_bathrooms: new.number_of_bathrooms,
            number_of_bedrooms: new.number_of_bedrooms,
        };
        properties.push(property.clone());
        Ok(property)
    }
}

impl Database<Select<By<Option<Reservation>, reservation::Id>>> for Memory {
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

impl Database<Insert<reservation::New>> for Memory {
    type Ok = Reservation;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<reservation::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut reservations = self.reservations.lock().unwrap();
        let reservation = Reservation {
            id: next_id(reservations.len()),
            property_id: new.property_id,
            guest_id: new.guest_id,
            start_date: new.period.start(),
            end_date: new.period.end(),
        };
        reservations.push(reservation.clone());
        Ok(reservation)
    }
}

impl Database<Update<(reservation::Id, reservation::Change)>> for Memory {
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, change)): Update<(reservation::Id, reservation::Change)>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut reservations = self.reservations.lock().unwrap();
        let Some(reservation) = reservations.iter_mut().find(|r| r.id == id)
        else {
            return Ok(None);
        };
        if let Some(start) = change.start() {
            reservation.start_date = start;
        }
        if let Some(end) = change.end() {
            reservation.end_date = end;
        }
        Ok(Some(reservation.clone()))
    }
}

impl Database<Delete<By<Option<Reservation>, reservation::Id>>> for Memory {
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut reservations = self.reservations.lock().unwrap();
        Ok(reservations
            .iter()
            .position(|r| r.id == id)
            .map(|idx| reservations.remove(idx)))
    }
}
