//! [`Client`] definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;
use tracing as log;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Postgres database client lazily acquiring a pooled [`Connection`].
#[derive(Clone, Debug)]
pub struct Client {
    /// [`connection::Pool`] to acquire a [`Connection`] from.
    pool: connection::Pool,

    /// [`Connection`] acquired from the [`connection::Pool`], if any.
    connection: Arc<RwLock<Option<connection::Pooled>>>,
}

impl Client {
    /// Creates a new [`Client`] from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            connection: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the underlying [`Connection`] of this [`Client`], acquiring it
    /// on the first use or once the previous one is closed.
    async fn connection(
        &self,
    ) -> Result<
        RwLockReadGuard<'_, connection::Pooled>,
        Traced<database::Error>,
    > {
        let connection = self.connection.read().await;
        let guard = if is_closed(connection.as_ref()) {
            drop(connection);

            let mut connection = self.connection.write().await;
            if is_closed(connection.as_ref()) {
                log::debug!("acquiring a new Postgres connection");
                *connection = Some(
                    self.pool
                        .get()
                        .await
                        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                        .map_err(tracerr::map_from)?,
                );
            }

            connection.downgrade()
        } else {
            connection
        };

        Ok(RwLockReadGuard::map(guard, |conn| {
            conn.as_ref()
                .expect("connection cannot be dropped while guard is alive")
        }))
    }
}

/// Indicates whether the provided [`Connection`] is not acquired or is closed
/// already.
fn is_closed(connection: Option<&connection::Pooled>) -> bool {
    connection.map_or(true, |c| c.is_closed())
}

impl Connection for Client {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_one<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Row, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_one(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }
}
