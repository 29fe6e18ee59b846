//! GraphQL API definitions.

mod mutation;
pub mod property;
mod query;
pub mod reservation;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;
use service::read;

use crate::{define_error, Context, Error};

pub use self::{
    mutation::Mutation, property::Property, query::Query,
    reservation::Reservation, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum LimitError {
        #[code = "INVALID_LIMIT"]
        #[status = BAD_REQUEST]
        #[message = "Limit must be between 0 and 65535"]
        OutOfRange,
    }
}

/// Converts the provided GraphQL `limit` argument into a [`read::Limit`],
/// falling back to the configured default one.
///
/// # Errors
///
/// With [`LimitError::OutOfRange`] if the `limit` doesn't fit into a
/// [`read::Limit`].
pub(crate) fn limit(
    limit: Option<i32>,
    ctx: &Context,
) -> Result<read::Limit, Error> {
    limit.map_or(Ok(ctx.service().config().default_limit), |l| {
        u16::try_from(l)
            .map(Into::into)
            .map_err(|_| LimitError::OutOfRange.into())
            .map_err(ctx.error())
    })
}
