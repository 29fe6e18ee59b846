//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of a [`User`] row.
const COLUMNS: &str = "id, name, email, password";

/// Reads a [`User`] from the provided [`Row`] selecting [`COLUMNS`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password"),
    }
}

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM users \
             WHERE id = $1::INT4"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<User>, user::Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM users \
             WHERE LOWER(email) = LOWER($1::VARCHAR) \
             LIMIT 1"
        );
        Ok(self
            .query_opt(&sql, &[&email])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<user::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = User;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<user::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let user::New {
            name,
            email,
            password_hash,
        } = user;

        let sql = format!(
            "INSERT INTO users (name, email, password) \
             VALUES ($1::VARCHAR, $2::VARCHAR, $3::VARCHAR) \
             RETURNING {COLUMNS}"
        );
        self.query_one(&sql, &[&name, &email, &password_hash])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| from_row(&row))
    }
}
