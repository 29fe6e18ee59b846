//! Infrastructure layer the [`Service`] stores its data with.

pub mod database;

#[cfg(doc)]
use crate::Service;

pub use self::database::Database;
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
