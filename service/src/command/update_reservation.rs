//! [`Command`] for updating dates of an existing [`Reservation`].

use common::{
    operations::{By, Select, Update},
    Date,
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::reservation::{EndDate, StartDate};
use crate::{
    domain::{reservation, Reservation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating dates of an existing [`Reservation`].
///
/// Only the provided dates are changed, while at least one of them must be
/// provided.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpdateReservation {
    /// ID of the [`Reservation`] to update.
    pub reservation_id: reservation::Id,

    /// New [`StartDate`] of the [`Reservation`], if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<reservation::StartDate>,

    /// New [`EndDate`] of the [`Reservation`], if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<reservation::EndDate>,
}

impl<Db> Command<UpdateReservation> for Service<Db>
where
    Db: Database<
            Select<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Update<(reservation::Id, reservation::Change)>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateReservation {
            reservation_id,
            start_date,
            end_date,
        } = cmd;

        let change = reservation::Change::new(start_date, end_date)
            .ok_or(E::NothingToUpdate)
            .map_err(tracerr::wrap!())?;
        change
            .check_not_past(Date::today())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let existing = self
            .database()
            .execute(Select(By::<Option<Reservation>, _>::new(reservation_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())?;
        _ = change
            .apply(existing.period())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let updated = self
            .database()
            .execute(Update((reservation_id, change)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            // Deleted concurrently.
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())?;

        log::debug!(
            "`Reservation(id: {reservation_id})` dates updated: {} - {}",
            updated.start_date,
            updated.end_date,
        );
        Ok(updated)
    }
}

/// Error of [`UpdateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Neither of dates is provided.
    #[display("Neither start nor end date is provided")]
    #[from(ignore)]
    NothingToUpdate,

    /// Updated dates don't form a valid [`reservation::Period`].
    #[display("Invalid `Reservation` period: {_0}")]
    InvalidPeriod(reservation::PeriodError),

    /// [`Reservation`] doesn't exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    #[from(ignore)]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{property, reservation, Reservation},
        infra::database::Memory,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateReservation};

    fn service() -> Service<Memory> {
        let db = Memory::default();
        db.reservations.lock().unwrap().push(Reservation {
            id: 1.into(),
            property_id: 1.into(),
            guest_id: 1.into(),
            start_date: "2099-03-10".parse().unwrap(),
            end_date: "2099-03-20".parse().unwrap(),
        });
        Service::new(Config::default(), db)
    }

    #[tokio::test]
    async fn updates_end_date_only() {
        let svc = service();

        let updated = svc
            .execute(UpdateReservation {
                reservation_id: 1.into(),
                start_date: None,
                end_date: Some("2099-03-15".parse().unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(updated.id, reservation::Id::from(1));
        assert_eq!(updated.property_id, property::Id::from(1));
        assert_eq!(updated.start_date.to_string(), "2099-03-10");
        assert_eq!(updated.end_date.to_string(), "2099-03-15");
    }

    #[tokio::test]
    async fn updates_both_dates() {
        let svc = service();

        let updated = svc
            .execute(UpdateReservation {
                reservation_id: 1.into(),
                start_date: Some("2099-04-01".parse().unwrap()),
                end_date: Some("2099-04-04".parse().unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(updated.start_date.to_string(), "2099-04-01");
        assert_eq!(updated.end_date.to_string(), "2099-04-04");
    }

    #[tokio::test]
    async fn requires_any_date() {
        let svc = service();

        let err = svc
            .execute(UpdateReservation {
                reservation_id: 1.into(),
                start_date: None,
                end_date: None,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::NothingToUpdate),
            "{err}",
        );
    }

    #[tokio::test]
    async fn checks_merged_period() {
        let svc = service();

        let err = svc
            .execute(UpdateReservation {
                reservation_id: 1.into(),
                start_date: Some("2099-03-20".parse().unwrap()),
                end_date: None,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::InvalidPeriod(
                    reservation::PeriodError::StartNotBeforeEnd,
                ),
            ),
            "{err}",
        );
        let stored = svc.database().reservations.lock().unwrap()[0].clone();
        assert_eq!(stored.start_date.to_string(), "2099-03-10");
    }

    #[tokio::test]
    async fn rejects_past_dates() {
        let svc = service();

        let err = svc
            .execute(UpdateReservation {
                reservation_id: 1.into(),
                start_date: None,
                end_date: Some("2019-03-15".parse().unwrap()),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::InvalidPeriod(
                    reservation::PeriodError::EndNotInFuture,
                ),
            ),
            "{err}",
        );
    }

    #[tokio::test]
    async fn reports_missing_reservation() {
        let svc = service();

        let err = svc
            .execute(UpdateReservation {
                reservation_id: 2.into(),
                start_date: Some("2099-03-11".parse().unwrap()),
                end_date: None,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::ReservationNotExists(_)),
            "{err}",
        );
    }

    #[test]
    fn deserializes_partial_payload() {
        let cmd: UpdateReservation = serde_json::from_str(
            r#"{"reservation_id": 7, "end_date": "2099-03-15"}"#,
        )
        .unwrap();

        assert_eq!(cmd.reservation_id, reservation::Id::from(7));
        assert_eq!(cmd.start_date, None);
        assert_eq!(
            cmd.end_date.map(|d| d.to_string()).as_deref(),
            Some("2099-03-15"),
        );
    }
}
