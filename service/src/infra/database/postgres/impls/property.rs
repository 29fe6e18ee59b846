//! [`Property`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    MinorUnits, Money,
};
use tokio_postgres::Row;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, Property},
    infra::{
        database::{
            self,
            postgres::{
                statement::{value, Clauses, Params},
                Connection, LikePattern, Statement,
            },
            Postgres,
        },
        Database,
    },
    read::property::search,
};

/// Columns of a [`Property`] row, qualified to be joined with other tables.
pub(super) const COLUMNS: &str = "\
    properties.id, properties.owner_id, \
    properties.title, properties.description, \
    properties.thumbnail_photo_url, properties.cover_photo_url, \
    properties.cost_per_night, \
    properties.street, properties.city, properties.province, \
    properties.post_code, properties.country, \
    properties.parking_spaces, \
    properties.number_of_bathrooms, properties.number_of_bedrooms";

/// Reads a [`Property`] from the provided [`Row`] selecting [`COLUMNS`].
pub(super) fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        thumbnail_photo_url: row.get("thumbnail_photo_url"),
        cover_photo_url: row.get("cover_photo_url"),
        cost_per_night: row.get("cost_per_night"),
        street: row.get("street"),
        city: row.get("city"),
        province: row.get("province"),
        post_code: row.get("post_code"),
        country: row.get("country"),
        parking_spaces: row.get("parking_spaces"),
        number_of_bathrooms: row.get("number_of_bathrooms"),
        number_of_bedrooms: row.get("number_of_bedrooms"),
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE properties.id = $1::INT4"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<property::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<property::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let property::New {
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
        } = property;

        let sql = format!(
            "INSERT INTO properties (\
                owner_id, title, description, \
                thumbnail_photo_url, cover_photo_url, \
                cost_per_night, \
                street, city, province, post_code, country, \
                parking_spaces, number_of_bathrooms, number_of_bedrooms\
             ) \
             VALUES (\
                $1::INT4, $2::VARCHAR, $3::TEXT, \
                $4::VARCHAR, $5::VARCHAR, \
                $6::INT4, \
                $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
                $10::VARCHAR, $11::VARCHAR, \
                $12::INT4, $13::INT4, $14::INT4\
             ) \
             RETURNING {COLUMNS}"
        );
        self.query_one(
            &sql,
            &[
                &owner_id,
                &title,
                &description,
                &thumbnail_photo_url,
                &cover_photo_url,
                &cost_per_night,
                &street,
                &city,
                &province,
                &post_code,
                &country,
                &parking_spaces,
                &number_of_bathrooms,
                &number_of_bedrooms,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| from_row(&row))
    }
}

impl<C> Database<Select<By<Vec<search::Listing>, search::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<search::Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<search::Listing>, search::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Statement { sql, params } = search_statement(by.into_inner());
        log::debug!("searching properties: {sql}");

        Ok(self
            .query(&sql, &params.as_refs())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| search::Listing {
                property: from_row(row),
                average_rating: row.get("average_rating"),
            })
            .collect())
    }
}

/// Converts the provided [`Money`] into [`MinorUnits`], saturating amounts
/// too large to be stored.
fn minor_units(money: Money) -> MinorUnits {
    money.to_minor_units().unwrap_or(MinorUnits::MAX)
}

/// Builds a [`Statement`] searching [`Property`]s by the provided
/// [`search::Selector`].
fn search_statement(selector: search::Selector) -> Statement {
    let search::Selector {
        options:
            search::Options {
                city,
                owner_id,
                minimum_price_per_night,
                maximum_price_per_night,
                minimum_rating,
            },
        limit,
    } = selector;

    let mut conditions = Clauses::default();
    if let Some(city) = city {
        _ = conditions.push(
            "LOWER(properties.city) LIKE LOWER($?::VARCHAR)",
            [value(LikePattern::contains(city.as_ref()))],
        );
    }
    if let Some(owner_id) = owner_id {
        _ = conditions
            .push("properties.owner_id = $?::INT4", [value(owner_id)]);
    }
    match (minimum_price_per_night, maximum_price_per_night) {
        (Some(min), Some(max)) => {
            _ = conditions.push(
                "properties.cost_per_night BETWEEN $?::INT4 AND $?::INT4",
                [value(minor_units(min)), value(minor_units(max))],
            );
        }
        (Some(min), None) => {
            _ = conditions.push(
                "properties.cost_per_night >= $?::INT4",
                [value(minor_units(min))],
            );
        }
        (None, Some(max)) => {
            _ = conditions.push(
                "properties.cost_per_night <= $?::INT4",
                [value(minor_units(max))],
            );
        }
        (None, None) => {}
    }

    let mut having = Clauses::default();
    if let Some(rating) = minimum_rating {
        _ = having.push(
            "AVG(property_reviews.rating) >= $?::NUMERIC",
            [value(rating)],
        );
    }

    let mut params = Params::default();
    let conditions = conditions.render("WHERE", " AND ", &mut params);
    let having = having.render("HAVING", " AND ", &mut params);
    let limit = params.bind(value(limit.sql()));

    let sql = format!(
        "SELECT {COLUMNS}, \
                AVG(property_reviews.rating) AS average_rating \
         FROM properties \
         JOIN property_reviews \
           ON properties.id = property_reviews.property_id \
         {conditions} \
         GROUP BY properties.id \
         {having} \
         ORDER BY properties.cost_per_night \
         LIMIT {limit}::INT8"
    );
    Statement { sql, params }
}
