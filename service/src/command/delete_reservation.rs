//! [`Command`] for deleting an existing [`Reservation`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{reservation, Reservation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an existing [`Reservation`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteReservation {
    /// ID of the [`Reservation`] to delete.
    pub reservation_id: reservation::Id,
}

impl<Db> Command<DeleteReservation> for Service<Db>
where
    Db: Database<
        Delete<By<Option<Reservation>, reservation::Id>>,
        Ok = Option<Reservation>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteReservation { reservation_id } = cmd;

        self.database()
            .execute(Delete(By::<Option<Reservation>, _>::new(
                reservation_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Reservation`] doesn't exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    #[from(ignore)]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::Reservation, infra::database::Memory, Command as _, Config,
        Service,
    };

    use super::{DeleteReservation, ExecutionError};

    #[tokio::test]
    async fn deletes_once() {
        let db = Memory::default();
        db.reservations.lock().unwrap().push(Reservation {
            id: 3.into(),
            property_id: 1.into(),
            guest_id: 1.into(),
            start_date: "2099-03-10".parse().unwrap(),
            end_date: "2099-03-20".parse().unwrap(),
        });
        let svc = Service::new(Config::default(), db);

        let deleted = svc
            .execute(DeleteReservation {
                reservation_id: 3.into(),
            })
            .await
            .unwrap();
        assert_eq!(deleted.end_date.to_string(), "2099-03-20");
        assert!(svc.database().reservations.lock().unwrap().is_empty());

        let err = svc
            .execute(DeleteReservation {
                reservation_id: 3.into(),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), ExecutionError::ReservationNotExists(_)),
            "{err}",
        );
    }
}
