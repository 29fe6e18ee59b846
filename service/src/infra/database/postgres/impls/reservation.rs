//! [`Reservation`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{reservation, Reservation},
    infra::{
        database::{
            self,
            postgres::{
                statement::{value, Clauses, Params},
                Connection, Statement,
            },
            Postgres,
        },
        Database,
    },
    read::reservation::listing,
};

use super::property;

/// Columns of a [`Reservation`] row.
const COLUMNS: &str = "id, property_id, guest_id, start_date, end_date";

/// Reads a [`Reservation`] from the provided [`Row`] selecting [`COLUMNS`].
fn from_row(row: &Row) -> Reservation {
    Reservation {
        id: row.get("id"),
        property_id: row.get("property_id"),
        guest_id: row.get("guest_id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    }
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM reservations \
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

impl<C> Database<Insert<reservation::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Reservation;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<reservation::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let reservation::New {
            property_id,
            guest_id,
            period,
        } = reservation;

        let sql = format!(
            "INSERT INTO reservations (\
                property_id, guest_id, start_date, end_date\
             ) \
             VALUES ($1::INT4, $2::INT4, $3::DATE, $4::DATE) \
             RETURNING {COLUMNS}"
        );
        self.query_one(
            &sql,
            &[&property_id, &guest_id, &period.start(), &period.end()],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| from_row(&row))
    }
}

impl<C> Database<Update<(reservation::Id, reservation::Change)>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update((id, change)): Update<(reservation::Id, reservation::Change)>,
    ) -> Result<Self::Ok, Self::Err> {
        let Statement { sql, params } = update_statement(id, change);
        log::debug!("updating `Reservation(id: {id})`: {sql}");

        Ok(self
            .query_opt(&sql, &params.as_refs())
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Delete<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "DELETE FROM reservations \
             WHERE id = $1::INT4 \
             RETURNING {COLUMNS}"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<listing::Item>, listing::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<listing::Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<listing::Item>, listing::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let listing::Selector {
            guest_id,
            timeframe,
            limit,
        } = by.into_inner();

        let timeframe = match timeframe {
            listing::Timeframe::Fulfilled => {
                "reservations.start_date <= CURRENT_DATE"
            }
            listing::Timeframe::Upcoming => {
                "reservations.start_date > CURRENT_DATE"
            }
        };
        let sql = format!(
            "SELECT {columns}, \
                    reservations.id AS reservation_id, \
                    reservations.guest_id, \
                    reservations.start_date, \
                    reservations.end_date, \
                    AVG(property_reviews.rating) AS average_rating \
             FROM reservations \
             JOIN properties \
               ON reservations.property_id = properties.id \
             JOIN property_reviews \
               ON properties.id = property_reviews.property_id \
             WHERE reservations.guest_id = $1::INT4 \
               AND {timeframe} \
             GROUP BY properties.id, reservations.id \
             ORDER BY reservations.start_date \
             LIMIT $2::INT8",
            columns = property::COLUMNS,
        );
        Ok(self
            .query(&sql, &[&guest_id, &limit.sql()])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let property = property::from_row(row);
                listing::Item {
                    reservation: Reservation {
                        id: row.get("reservation_id"),
                        property_id: property.id,
                        guest_id: row.get("guest_id"),
                        start_date: row.get("start_date"),
                        end_date: row.get("end_date"),
                    },
                    property,
                    average_rating: row.get("average_rating"),
                }
            })
            .collect())
    }
}

/// Builds a [`Statement`] applying the provided [`reservation::Change`] to
/// the [`Reservation`] with the given ID, returning its updated row.
///
/// Assignments are bound in the order of the [`Reservation`] dates, so the
/// ID is always bound last.
fn update_statement(
    id: reservation::Id,
    change: reservation::Change,
) -> Statement {
    let mut assignments = Clauses::default();
    if let Some(start) = change.start() {
        _ = assignments.push("start_date = $?::DATE", [value(start)]);
    }
    if let Some(end) = change.end() {
        _ = assignments.push("end_date = $?::DATE", [value(end)]);
    }

    let mut params = Params::default();
    let assignments = assignments.render("SET", ", ", &mut params);
    let id = params.bind(value(id));

    let sql = format!(
        "UPDATE reservations \
         {assignments} \
         WHERE id = {id}::INT4 \
         RETURNING {COLUMNS}"
    );
    Statement { sql, params }
}

#[cfg(test)]
mod spec {
    use crate::domain::reservation::{Change, Id};

    use super::update_statement;

    fn id(id: i32) -> Id {
        id.into()
    }

    #[test]
    fn updates_start_date_only() {
        let stmt = update_statement(
            id(5),
            Change::Start("2027-09-01".parse().unwrap()),
        );

        assert_eq!(
            stmt.sql,
            "UPDATE reservations \
             SET start_date = $1::DATE \
             WHERE id = $2::INT4 \
             RETURNING id, property_id, guest_id, start_date, end_date",
        );
        assert_eq!(stmt.params.len(), 2);
        let params = format!("{:?}", stmt.params.as_refs());
        assert!(params.contains("2027-09-01"), "{params}");
        assert!(params.ends_with(", Id(5)]"), "{params}");
    }

    #[test]
    fn updates_end_date_only() {
        let stmt =
            update_statement(id(5), Change::End("2027-09-14".parse().unwrap()));

        assert!(
            stmt.sql.starts_with(
                "UPDATE reservations \
                 SET end_date = $1::DATE \
                 WHERE id = $2::INT4",
            ),
            "{}",
            stmt.sql,
        );
        assert_eq!(stmt.params.len(), 2);
    }

    #[test]
    fn updates_both_dates() {
        let stmt = update_statement(
            id(12),
            Change::Both(
                "2027-09-01".parse().unwrap(),
                "2027-09-14".parse().unwrap(),
            ),
        );

        assert!(
            stmt.sql.starts_with(
                "UPDATE reservations \
                 SET start_date = $1::DATE, end_date = $2::DATE \
                 WHERE id = $3::INT4",
            ),
            "{}",
            stmt.sql,
        );
        assert_eq!(stmt.params.len(), 3);
        let params = format!("{:?}", stmt.params.as_refs());
        let (start, end) = (
            params.find("2027-09-01").unwrap(),
            params.find("2027-09-14").unwrap(),
        );
        assert!(start < end, "{params}");
        assert!(params.ends_with(", Id(12)]"), "{params}");
    }
}
