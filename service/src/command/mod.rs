//! [`Command`] definition.

pub mod create_property;
pub mod create_reservation;
pub mod create_user;
pub mod delete_reservation;
pub mod update_reservation;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_property::CreateProperty, create_reservation::CreateReservation,
    create_user::CreateUser, delete_reservation::DeleteReservation,
    update_reservation::UpdateReservation,
};
