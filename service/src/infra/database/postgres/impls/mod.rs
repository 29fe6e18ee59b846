//! [`Database`] implementations backed by [`Postgres`].
//!
//! [`Postgres`]: super::Postgres

mod property;
mod reservation;
mod user;

#[cfg(doc)]
use crate::infra::Database;
