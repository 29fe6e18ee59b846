//! [`Command`] for creating a new [`User`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<user::New>,
            Ok = User,
            Err = Traced<database::Error>,
        >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            password,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(email.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let new = user::New {
            name,
            email: email.clone(),
            password_hash: user::PasswordHash::new(password.expose_secret()),
        };
        self.database().execute(Insert(new)).await.map_err(|e| {
            // Concurrent registration with the same email.
            if e.as_ref().is_unique_violation() {
                tracerr::new!(E::EmailOccupied(email))
            } else {
                tracerr::map_from(e)
            }
        })
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        domain::user,
        infra::database::Memory,
        Command as _, Config, Service,
    };

    use super::{CreateUser, ExecutionError};

    fn cmd(email: &str) -> CreateUser {
        CreateUser {
            name: user::Name::new("Devin Sanders").unwrap(),
            email: user::Email::new(email).unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new("password").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn creates_user() {
        let svc = Service::new(Config::default(), Memory::default());

        let user = svc.execute(cmd("devin@example.com")).await.unwrap();

        assert_eq!(user.email.to_string(), "devin@example.com");
        assert_eq!(svc.database().users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let svc = Service::new(Config::default(), Memory::default());
        _ = svc.execute(cmd("devin@example.com")).await.unwrap();

        let err = svc.execute(cmd("devin@example.com")).await.unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::EmailOccupied(_)),
            "{err}",
        );
        assert_eq!(svc.database().users.lock().unwrap().len(), 1);
    }
}
